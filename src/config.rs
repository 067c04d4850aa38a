use serde::{Deserialize, Serialize};

use crate::Result;
use crate::backend::IDEOGRAM_BASE_URL;

/// Server configuration. All fields default so a missing or partial config
/// file still yields a runnable relay.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            upstream_base_url: default_upstream_base_url(),
            timeout_seconds: None,
            json_logs: false,
        }
    }
}

impl RelayConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_upstream_base_url() -> String {
    IDEOGRAM_BASE_URL.to_string()
}
