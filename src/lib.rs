pub mod backend;
pub mod config;
mod error;
pub mod http;
pub mod observability;
pub mod types;

pub use backend::{IDEOGRAM_BASE_URL, IdeogramBackend, ImageBackend};
pub use config::RelayConfig;
pub use error::{RelayError, Result};
pub use http::RelayHttpState;
pub use observability::{Observability, ObservabilitySnapshot};
pub use types::{Capabilities, ErrorCode, GenerationRequest, GenerationResponse, ImageRequest};
