use ideogram_relay::{IdeogramBackend, RelayConfig, RelayHttpState};

const USAGE: &str =
    "usage: ideogram-relay [config.json] [--listen HOST:PORT] [--upstream BASE_URL] [--timeout SECS] [--json-logs]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let mut config = RelayConfig::default();
    let mut listen: Option<String> = None;
    let mut upstream: Option<String> = None;
    let mut timeout_seconds: Option<u64> = None;
    let mut json_logs = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--listen" | "--addr" => {
                listen = Some(args.next().ok_or("missing value for --listen/--addr")?);
            }
            "--upstream" => {
                upstream = Some(args.next().ok_or("missing value for --upstream")?);
            }
            "--timeout" => {
                let raw = args.next().ok_or("missing value for --timeout")?;
                timeout_seconds = Some(raw.parse::<u64>().map_err(|_| "invalid --timeout")?);
            }
            "--json-logs" => {
                json_logs = true;
            }
            path if !path.starts_with('-') => {
                let raw = std::fs::read_to_string(path)?;
                config = RelayConfig::from_json_str(&raw)?;
            }
            other => {
                return Err(format!("unknown argument: {other}\n{USAGE}").into());
            }
        }
    }

    if let Some(listen) = listen {
        config.listen = listen;
    }
    if let Some(upstream) = upstream {
        config.upstream_base_url = upstream;
    }
    if let Some(timeout_seconds) = timeout_seconds {
        config.timeout_seconds = Some(timeout_seconds);
    }
    if json_logs {
        config.json_logs = true;
    }

    let backend = IdeogramBackend::new()?
        .with_base_url(&config.upstream_base_url)
        .with_request_timeout_seconds(config.timeout_seconds);

    let mut state = RelayHttpState::new(backend);
    if config.json_logs {
        state = state.with_json_logs();
    }

    let app = ideogram_relay::http::router(state);
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    println!("ideogram-relay listening on {}", config.listen);
    axum::serve(listener, app).await?;
    Ok(())
}
