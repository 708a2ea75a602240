//! HTTP transport layer for the Higgsfield SDK.

use crate::config::ClientConfig;
use crate::error::{HiggsfieldError, HiggsfieldResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "hf-api-key";
/// Header carrying the API secret.
pub const SECRET_HEADER: &str = "hf-secret";

/// HTTP transport for making API requests.
///
/// Holds an immutable header set attached to every request; nothing else is
/// shared between calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    headers: header::HeaderMap,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> HiggsfieldResult<Self> {
        let headers = default_headers(&config);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers.clone())
            .build()?;

        Ok(Self {
            client,
            headers,
            config,
        })
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &header::HeaderMap {
        &self.headers
    }

    /// Build a URL from path segments, percent-encoding each one.
    fn build_url(&self, segments: &[&str]) -> HiggsfieldResult<url::Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HiggsfieldError::Config("base_url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and turn non-2xx statuses into errors.
    async fn execute(&self, request_builder: RequestBuilder) -> HiggsfieldResult<Response> {
        let response = request_builder.send().await.map_err(transport_error)?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status = status, "Request rejected by upstream");
        Err(HiggsfieldError::from_response(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> HiggsfieldResult<T> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> HiggsfieldResult<T> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "GET request");

        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> HiggsfieldResult<T> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "GET request with query");

        let response = self.execute(self.client.get(url).query(query)).await?;
        Self::decode(response).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> HiggsfieldResult<T> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "POST request");

        let response = self.execute(self.client.post(url).json(body)).await?;
        Self::decode(response).await
    }

    /// Execute a DELETE request without a response body.
    pub async fn delete_no_response(&self, segments: &[&str]) -> HiggsfieldResult<()> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "DELETE request (no response)");

        self.execute(self.client.delete(url)).await?;
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> HiggsfieldError {
    if e.is_timeout() {
        HiggsfieldError::Timeout
    } else {
        HiggsfieldError::Http(e)
    }
}

/// Credential and content headers. Construction never fails: a credential
/// that is not a valid header value is sent empty and rejected upstream.
fn default_headers(config: &ClientConfig) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();

    headers.insert(
        header::HeaderName::from_static(API_KEY_HEADER),
        credential_value(API_KEY_HEADER, &config.api_key),
    );
    headers.insert(
        header::HeaderName::from_static(SECRET_HEADER),
        credential_value(SECRET_HEADER, &config.secret),
    );
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    headers
}

fn credential_value(name: &str, value: &str) -> header::HeaderValue {
    let mut header_value = header::HeaderValue::from_str(value).unwrap_or_else(|_| {
        warn!(header = name, "Credential contains invalid header characters, sending empty value");
        header::HeaderValue::from_static("")
    });
    header_value.set_sensitive(true);
    header_value
}
