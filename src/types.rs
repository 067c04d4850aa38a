use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MODEL: &str = "V_2";
pub const DEFAULT_ASPECT_RATIO: &str = "ASPECT_1_1";
pub const DEFAULT_MAGIC_PROMPT_OPTION: &str = "AUTO";
pub const DEFAULT_STYLE_TYPE: &str = "AUTO";
pub const DEFAULT_NUM_IMAGES: u32 = 1;

/// Inbound generation request. Every field except `prompt` is optional;
/// `prompt` is defaulted here too so that a body without it deserializes and
/// can be rejected with the validation envelope instead of a parse fault.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub magic_prompt_option: Option<String>,
    #[serde(default)]
    pub style_type: Option<String>,
    #[serde(default)]
    pub num_images: Option<u32>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
}

/// Upstream wire shape with every default applied. Empty strings and a zero
/// image count fall back to the defaults, matching what callers of the
/// original dashboard endpoint relied on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: String,
    pub magic_prompt_option: String,
    pub style_type: String,
    pub num_images: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

impl ImageRequest {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            model: defaulted(request.model.as_deref(), DEFAULT_MODEL),
            prompt: request.prompt.clone(),
            aspect_ratio: defaulted(request.aspect_ratio.as_deref(), DEFAULT_ASPECT_RATIO),
            magic_prompt_option: defaulted(
                request.magic_prompt_option.as_deref(),
                DEFAULT_MAGIC_PROMPT_OPTION,
            ),
            style_type: defaulted(request.style_type.as_deref(), DEFAULT_STYLE_TYPE),
            num_images: request
                .num_images
                .filter(|count| *count > 0)
                .unwrap_or(DEFAULT_NUM_IMAGES),
            negative_prompt: request
                .negative_prompt
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

fn defaulted(value: Option<&str>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingApiKey,
    InvalidApiKey,
    ApiError,
}

/// The envelope returned to callers on every path, success or failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl GenerationResponse {
    pub fn generated(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some("Image generated successfully".to_string()),
            error: None,
            details: None,
            code: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            details: None,
            code: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }
}

/// Static capability descriptor served by GET on the generate path.
#[derive(Clone, Debug, Serialize)]
pub struct Capabilities {
    pub endpoint: &'static str,
    pub method: &'static str,
    pub description: &'static str,
    pub required_headers: &'static [&'static str],
    pub required_fields: &'static [&'static str],
    pub models: &'static [&'static str],
    pub aspect_ratios: &'static [&'static str],
    pub style_types: &'static [&'static str],
    pub status: &'static str,
}

impl Capabilities {
    pub fn descriptor() -> Self {
        Self {
            endpoint: "Ideogram Generate API v3",
            method: "POST",
            description: "Generate images using Ideogram AI",
            required_headers: &["x-api-key"],
            required_fields: &["prompt"],
            models: &["V_2", "V_2_TURBO"],
            aspect_ratios: &["ASPECT_1_1", "ASPECT_16_9", "ASPECT_9_16"],
            style_types: &["AUTO", "DESIGN", "PHOTO", "RENDER"],
            status: "Ready for professional graphics automation",
        }
    }
}
