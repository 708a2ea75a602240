//! Main client for the Higgsfield SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::HiggsfieldResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Higgsfield platform API.
///
/// Cheap to clone and safe to share between concurrent callers: every
/// operation issues exactly one request and no state changes after
/// construction.
#[derive(Clone)]
pub struct HiggsfieldClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl HiggsfieldClient {
    /// Create a new client builder.
    pub fn builder() -> HiggsfieldClientBuilder {
        HiggsfieldClientBuilder::new()
    }

    /// Client for the production host with the given credentials.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> HiggsfieldResult<Self> {
        Self::builder().api_key(api_key).secret(secret).build()
    }

    /// Create a client from configuration.
    fn from_config(config: ClientConfig) -> HiggsfieldResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> &reqwest::header::HeaderMap {
        self.http.headers()
    }

    /// Get the generation API (image, video, talking head).
    pub fn generation(&self) -> GenerationApi<'_> {
        GenerationApi::new(self)
    }

    /// Get the job sets API.
    pub fn job_sets(&self) -> JobSetsApi<'_> {
        JobSetsApi::new(self)
    }

    /// Get the character references API.
    pub fn characters(&self) -> CharactersApi<'_> {
        CharactersApi::new(self)
    }

    /// Get the style and motion catalog API.
    pub fn catalog(&self) -> CatalogApi<'_> {
        CatalogApi::new(self)
    }
}

impl std::fmt::Debug for HiggsfieldClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiggsfieldClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating a HiggsfieldClient.
pub struct HiggsfieldClientBuilder {
    base_url: Option<String>,
    api_key: String,
    secret: String,
    timeout: Duration,
}

impl HiggsfieldClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: String::new(),
            secret: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the platform base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the API secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// Empty credentials are accepted; requests then fail upstream with an
    /// authentication error.
    pub fn build(self) -> HiggsfieldResult<HiggsfieldClient> {
        let base_url_str = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url_str)?;

        let config = ClientConfig {
            base_url,
            api_key: self.api_key,
            secret: self.secret,
            timeout: self.timeout,
        };

        HiggsfieldClient::from_config(config)
    }
}

impl Default for HiggsfieldClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
