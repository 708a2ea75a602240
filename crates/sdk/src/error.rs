//! Error types for the Higgsfield SDK.

use serde::Deserialize;

/// Result type for SDK operations.
pub type HiggsfieldResult<T> = Result<T, HiggsfieldError>;

/// Error types that can occur when calling the Higgsfield API.
#[derive(Debug, thiserror::Error)]
pub enum HiggsfieldError {
    /// Transport failure: DNS, connection refused, TLS, broken stream.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-2xx status.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    /// The request did not complete within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A 2xx response body that could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl HiggsfieldError {
    /// Whether the request failed before an HTTP status was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout)
    }

    /// HTTP status of an upstream rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| body.to_string());

        Self::Api {
            status,
            message,
            body: body.to_string(),
        }
    }
}

/// Error body shapes returned by the platform.
///
/// Validation failures come back as `{"detail": ...}` where `detail` may be a
/// string or a list of field errors.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) => return Some(detail),
            Some(serde_json::Value::Null) | None => {}
            Some(other) => return Some(other.to_string()),
        }
        self.error.or(self.message)
    }
}
