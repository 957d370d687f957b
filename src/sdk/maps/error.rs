use serde::Deserialize;
use thiserror::Error;

// Error body returned by the geolocation endpoint
#[derive(Deserialize, Debug)]
pub struct GoogleErrorDetail {
    pub code: u32,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
#[derive(Deserialize, Debug)]
pub struct GoogleErrorPayload {
    pub error: GoogleErrorDetail,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Geolocation capability is unavailable")]
    Unavailable,

    // Any non-OK status reported by the service itself
    #[error("API Error ({status}): {message}")]
    ApiError { status: String, message: String },

    #[error("No result: {0}")]
    NoResult(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn api(status: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::ApiError {
            status: status.into(),
            message: message.into(),
        }
    }
}

impl From<GoogleErrorPayload> for ProviderError {
    fn from(payload: GoogleErrorPayload) -> Self {
        let status = payload
            .error
            .status
            .unwrap_or_else(|| payload.error.code.to_string());
        ProviderError::ApiError {
            status,
            message: payload.error.message,
        }
    }
}
