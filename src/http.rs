use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::backend::ImageBackend;
use crate::observability::{Observability, ObservabilitySnapshot};
use crate::types::{Capabilities, ErrorCode, GenerationRequest, GenerationResponse};
use crate::{RelayError, Result};

static REQUEST_ID_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Clone)]
pub struct RelayHttpState {
    backend: Arc<dyn ImageBackend>,
    observability: Arc<Mutex<Observability>>,
    json_logs: bool,
}

impl RelayHttpState {
    pub fn new(backend: impl ImageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            observability: Arc::new(Mutex::new(Observability::default())),
            json_logs: false,
        }
    }

    pub fn with_json_logs(mut self) -> Self {
        self.json_logs = true;
        self
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(state: RelayHttpState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route(
            "/api/ideogram/generate",
            get(describe_generate).post(handle_generate),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn metrics(State(state): State<RelayHttpState>) -> Json<ObservabilitySnapshot> {
    let snapshot = state.observability.lock().await.snapshot();
    Json(snapshot)
}

async fn describe_generate() -> Json<Capabilities> {
    Json(Capabilities::descriptor())
}

async fn handle_generate(
    State(state): State<RelayHttpState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, HeaderMap, Json<GenerationResponse>) {
    let request_id = extract_header(&headers, "x-request-id").unwrap_or_else(generate_request_id);

    state.observability.lock().await.record_request();
    emit_json_log(
        &state,
        "relay.request",
        serde_json::json!({
            "request_id": &request_id,
            "bytes": body.len(),
        }),
    );

    let (status, envelope) = match relay_generate(&state, &headers, &body).await {
        Ok(envelope) => {
            state.observability.lock().await.record_generated();
            emit_json_log(
                &state,
                "relay.response",
                serde_json::json!({ "request_id": &request_id }),
            );
            (StatusCode::OK, envelope)
        }
        Err(err) => {
            {
                let mut observability = state.observability.lock().await;
                match &err {
                    RelayError::MissingApiKey => observability.record_missing_key(),
                    RelayError::MissingPrompt => observability.record_invalid_prompt(),
                    RelayError::Upstream { .. } => observability.record_upstream_error(),
                    _ => {}
                }
            }
            emit_json_log(
                &state,
                "relay.error",
                serde_json::json!({
                    "request_id": &request_id,
                    "error": err.to_string(),
                }),
            );
            map_relay_error(err)
        }
    };

    let mut response_headers = HeaderMap::new();
    insert_request_id(&mut response_headers, &request_id);
    (status, response_headers, Json(envelope))
}

/// The relay operation proper: parse, authenticate, validate, forward. The
/// body is parsed before the credential check so a malformed body reports
/// the internal-fault envelope regardless of headers.
async fn relay_generate(
    state: &RelayHttpState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<GenerationResponse> {
    let request: GenerationRequest = serde_json::from_slice(body)?;

    let api_key = extract_header(headers, "x-api-key").ok_or(RelayError::MissingApiKey)?;

    if request.prompt.is_empty() {
        return Err(RelayError::MissingPrompt);
    }

    state.observability.lock().await.record_upstream_call();
    let data = state.backend.generate(&api_key, request).await?;
    Ok(GenerationResponse::generated(data))
}

fn map_relay_error(err: RelayError) -> (StatusCode, GenerationResponse) {
    match err {
        RelayError::MissingApiKey => (
            StatusCode::UNAUTHORIZED,
            GenerationResponse::failure(err.to_string()).with_code(ErrorCode::MissingApiKey),
        ),
        RelayError::MissingPrompt => (
            StatusCode::BAD_REQUEST,
            GenerationResponse::failure(err.to_string()),
        ),
        RelayError::Upstream { status, body } => {
            let code = if status == StatusCode::UNAUTHORIZED {
                ErrorCode::InvalidApiKey
            } else {
                ErrorCode::ApiError
            };
            (
                status,
                GenerationResponse::failure(format!("Ideogram API Error: {}", status.as_u16()))
                    .with_details(body)
                    .with_code(code),
            )
        }
        RelayError::Http(err) => internal_error(err.to_string()),
        RelayError::Json(err) => internal_error(err.to_string()),
        RelayError::Io(err) => internal_error(err.to_string()),
    }
}

fn internal_error(details: String) -> (StatusCode, GenerationResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        GenerationResponse::failure("Internal server error").with_details(details),
    )
}

fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn generate_request_id() -> String {
    let seq = REQUEST_ID_SEQ.fetch_add(1, Ordering::Relaxed);
    let ts_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0);
    format!("relay-{ts_ms}-{seq}")
}

fn insert_request_id(headers: &mut HeaderMap, request_id: &str) {
    let value = match axum::http::HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(_) => return,
    };
    headers.insert("x-request-id", value);
}

fn emit_json_log(state: &RelayHttpState, event: &str, payload: serde_json::Value) {
    if !state.json_logs {
        return;
    }

    let record = serde_json::json!({
        "ts_ms": SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis())
            .unwrap_or(0),
        "event": event,
        "payload": payload,
    });
    eprintln!("{record}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_401_classifies_as_invalid_api_key() {
        let (status, envelope) = map_relay_error(RelayError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            body: "denied".to_string(),
        });
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(envelope.code, Some(ErrorCode::InvalidApiKey));
        assert_eq!(envelope.details.as_deref(), Some("denied"));
    }

    #[test]
    fn other_upstream_statuses_classify_as_api_error() {
        let (status, envelope) = map_relay_error(RelayError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".to_string(),
        });
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(envelope.code, Some(ErrorCode::ApiError));
        assert_eq!(envelope.error.as_deref(), Some("Ideogram API Error: 429"));
    }

    #[test]
    fn missing_prompt_carries_no_code() {
        let (status, envelope) = map_relay_error(RelayError::MissingPrompt);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.error.as_deref(), Some("Prompt is required"));
        assert_eq!(envelope.code, None);
    }

    #[test]
    fn blank_headers_are_treated_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "  ".parse().unwrap());
        assert_eq!(extract_header(&headers, "x-api-key"), None);
    }
}
