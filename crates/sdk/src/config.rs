//! Configuration types for the Higgsfield SDK.

use std::time::Duration;
use url::Url;

/// Production host of the Higgsfield platform API.
pub const DEFAULT_BASE_URL: &str = "https://platform.higgsfield.ai";

/// Per-request timeout. No retries are attempted after it elapses.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Higgsfield client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the platform API.
    pub base_url: Url,
    /// Value of the `hf-api-key` header.
    pub api_key: String,
    /// Value of the `hf-secret` header.
    pub secret: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and credentials.
    pub fn new(base_url: Url, api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            secret: secret.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Whether both credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.secret.is_empty()
    }

    /// Masked form of the API key, safe to echo in diagnostics.
    pub fn api_key_preview(&self) -> String {
        mask_credential(&self.api_key)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &mask_credential(&self.api_key))
            .field("secret", &mask_credential(&self.secret))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Keep the first four characters of a credential and hide the rest.
pub fn mask_credential(value: &str) -> String {
    if value.is_empty() {
        return "<unset>".to_string();
    }
    let visible: String = value.chars().take(4).collect();
    format!("{}...", visible)
}
