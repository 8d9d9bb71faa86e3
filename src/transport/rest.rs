//! REST backend implementation using reqwest.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use super::traits::{Backend, BackendResponse, Method};
use crate::Error;
use crate::config::TlsConfig;
use crate::error::ErrorKind;
use crate::types::{EntityId, ListParams};
use crate::user_agent;

// ============================================================================
// REST Backend
// ============================================================================

/// Back-office API over HTTP/JSON.
///
/// Sends one request per call, with no retries and no timeout unless one was
/// configured.
#[derive(Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestBackend {
    /// Creates a new REST backend builder.
    pub fn builder() -> RestBackendBuilder {
        RestBackendBuilder::new()
    }

    /// Creates a REST backend rooted at `base_url`.
    pub fn new(
        mut base_url: Url,
        tls_config: &TlsConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        // `Url::join` replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut client_builder = reqwest::Client::builder().user_agent(user_agent::user_agent());

        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if tls_config.skip_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(pem) = tls_config.load_ca_pem()? {
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("Invalid CA certificate: {}", e),
                )
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sets the bearer token sent with every request.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.auth_token.write() = Some(token.into());
    }

    /// Clears the bearer token.
    pub fn clear_auth_token(&self) {
        *self.auth_token.write() = None;
    }

    /// Builds default headers for requests.
    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref token) = *self.auth_token.read() {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).map_err(|_| {
                    Error::new(ErrorKind::Configuration, "Invalid auth token format")
                })?,
            );
        }

        Ok(headers)
    }

    /// Resolves `/{resource}` or `/{resource}/{id}` against the base URL.
    fn endpoint(&self, resource: &str, id: Option<&EntityId>) -> Result<Url, Error> {
        let path = match id {
            Some(id) => format!("{}/{}", resource, urlencoding::encode(id.as_str())),
            None => resource.to_string(),
        };
        self.base_url
            .join(&path)
            .map_err(|e| Error::new(ErrorKind::Configuration, format!("Invalid URL path: {}", e)))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<BackendResponse, Error> {
        let headers = self.build_headers()?;
        tracing::debug!(%method, url = %url, "sending request");

        let request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        }
        .headers(headers);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        tracing::debug!(%method, status, "response received");
        Ok(BackendResponse::with_status(status, decode_body(&bytes)))
    }
}

#[async_trait::async_trait]
impl Backend for RestBackend {
    async fn list(&self, resource: &str, params: &ListParams) -> Result<BackendResponse, Error> {
        let mut url = self.endpoint(resource, None)?;
        if !params.is_empty() {
            url.set_query(Some(&params.to_query_string()));
        }
        self.send(Method::Get, url, None).await
    }

    async fn get(&self, resource: &str, id: &EntityId) -> Result<BackendResponse, Error> {
        let url = self.endpoint(resource, Some(id))?;
        self.send(Method::Get, url, None).await
    }

    async fn patch(
        &self,
        resource: &str,
        id: &EntityId,
        body: Value,
    ) -> Result<BackendResponse, Error> {
        let url = self.endpoint(resource, Some(id))?;
        self.send(Method::Patch, url, Some(&body)).await
    }

    async fn create(&self, resource: &str, body: Value) -> Result<BackendResponse, Error> {
        let url = self.endpoint(resource, None)?;
        self.send(Method::Post, url, Some(&body)).await
    }

    async fn delete(&self, resource: &str, id: &EntityId) -> Result<BackendResponse, Error> {
        let url = self.endpoint(resource, Some(id))?;
        self.send(Method::Delete, url, None).await
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

// ============================================================================
// REST Backend Builder
// ============================================================================

/// Builder for [`RestBackend`].
pub struct RestBackendBuilder {
    base_url: Option<Url>,
    tls_config: TlsConfig,
    timeout: Option<Duration>,
    auth_token: Option<String>,
}

impl RestBackendBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            tls_config: TlsConfig::default(),
            timeout: None,
            auth_token: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(Url::parse(url.as_ref()).map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("Invalid base URL: {}", e))
        })?);
        Ok(self)
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets a request timeout. By default requests wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the bearer token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Builds the REST backend.
    pub fn build(self) -> Result<RestBackend, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::new(ErrorKind::Configuration, "Base URL is required"))?;

        let backend = RestBackend::new(base_url, &self.tls_config, self.timeout)?;
        if let Some(token) = self.auth_token {
            backend.set_auth_token(token);
        }
        Ok(backend)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Maps reqwest errors to client errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("Request timed out: {}", e)).with_source(e)
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("Connection failed: {}", e)).with_source(e)
    } else if e.is_decode() || e.is_body() {
        Error::new(ErrorKind::Transport, format!("Failed to read response: {}", e)).with_source(e)
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e)).with_source(e)
    }
}

// ============================================================================
// Tests
// ============================================================================
