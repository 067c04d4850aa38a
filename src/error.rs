use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API key required. Please add your Ideogram API key in Settings.")]
    MissingApiKey,
    #[error("Prompt is required")]
    MissingPrompt,
    #[error("Ideogram API Error: {}", .status.as_u16())]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
