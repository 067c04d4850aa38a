use std::io::Write;

use ideogram_relay::{IDEOGRAM_BASE_URL, RelayConfig};

#[test]
fn defaults_point_at_the_ideogram_api() {
    let config = RelayConfig::default();
    assert_eq!(config.listen, "127.0.0.1:8080");
    assert_eq!(config.upstream_base_url, IDEOGRAM_BASE_URL);
    assert_eq!(config.timeout_seconds, None);
    assert!(!config.json_logs);
}

#[test]
fn partial_config_file_fills_in_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"listen": "0.0.0.0:9001"}}"#).expect("write config");

    let raw = std::fs::read_to_string(file.path()).expect("read config");
    let config = RelayConfig::from_json_str(&raw).expect("parse config");
    assert_eq!(config.listen, "0.0.0.0:9001");
    assert_eq!(config.upstream_base_url, IDEOGRAM_BASE_URL);
    assert!(!config.json_logs);
}

#[test]
fn full_config_file_round_trips() {
    let config = RelayConfig {
        listen: "0.0.0.0:9001".to_string(),
        upstream_base_url: "http://127.0.0.1:9100".to_string(),
        timeout_seconds: Some(45),
        json_logs: true,
    };
    let raw = serde_json::to_string(&config).expect("serialize");
    let parsed = RelayConfig::from_json_str(&raw).expect("parse");
    assert_eq!(parsed.listen, config.listen);
    assert_eq!(parsed.upstream_base_url, config.upstream_base_url);
    assert_eq!(parsed.timeout_seconds, Some(45));
    assert!(parsed.json_logs);
}

#[test]
fn invalid_config_json_is_an_error() {
    assert!(RelayConfig::from_json_str("not json").is_err());
}
