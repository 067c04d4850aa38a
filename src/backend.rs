use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::types::{GenerationRequest, ImageRequest};
use crate::{RelayError, Result};

pub const IDEOGRAM_BASE_URL: &str = "https://api.ideogram.ai";

/// Seam between the HTTP surface and the upstream provider. Tests substitute
/// a recording implementation to prove no upstream call is made on caller
/// errors.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate(&self, api_key: &str, request: GenerationRequest) -> Result<Value>;
}

#[derive(Serialize)]
struct UpstreamBody {
    image_request: ImageRequest,
}

#[derive(Clone)]
pub struct IdeogramBackend {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Option<Duration>,
}

impl IdeogramBackend {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;
        Ok(Self {
            http,
            base_url: IDEOGRAM_BASE_URL.to_string(),
            request_timeout: None,
        })
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout_seconds(mut self, timeout_seconds: Option<u64>) -> Self {
        self.request_timeout = timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs);
        self
    }

    fn generate_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/generate") {
            base.to_string()
        } else {
            format!("{base}/generate")
        }
    }
}

#[async_trait]
impl ImageBackend for IdeogramBackend {
    async fn generate(&self, api_key: &str, request: GenerationRequest) -> Result<Value> {
        let body = UpstreamBody {
            image_request: ImageRequest::from_request(&request),
        };

        let mut req = self
            .http
            .post(self.generate_url())
            .header("Api-Key", api_key)
            .json(&body);
        if let Some(timeout) = self.request_timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream { status, body });
        }

        // The provider payload is deliberately opaque; callers receive it
        // verbatim under `data`.
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_url_joins_and_deduplicates() {
        let backend = IdeogramBackend::new().unwrap();
        assert_eq!(backend.generate_url(), "https://api.ideogram.ai/generate");

        let backend = IdeogramBackend::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(backend.generate_url(), "http://127.0.0.1:9000/generate");

        let backend = IdeogramBackend::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/generate");
        assert_eq!(backend.generate_url(), "http://127.0.0.1:9000/generate");
    }

    #[test]
    fn zero_timeout_is_ignored() {
        let backend = IdeogramBackend::new()
            .unwrap()
            .with_request_timeout_seconds(Some(0));
        assert!(backend.request_timeout.is_none());

        let backend = IdeogramBackend::new()
            .unwrap()
            .with_request_timeout_seconds(Some(30));
        assert_eq!(backend.request_timeout, Some(Duration::from_secs(30)));
    }
}
