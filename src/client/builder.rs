//! Client builder with typestate pattern.

use std::marker::PhantomData;
use std::time::Duration;

use crate::{
    Client, Error,
    config::{ListingConfig, TlsConfig},
};

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so that `build()` is only available once a URL
/// has been provided.
///
/// ## Optional Configuration
///
/// - `bearer_token()`: token sent as `Authorization: Bearer ...`
/// - `timeout()`: per-request timeout (none by default)
/// - `tls_config()`: custom CA or relaxed verification
/// - `listing_config()`: search throttle, page size, delete confirmation
///
/// ## Example
///
/// ```rust
/// use folio::Client;
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .url("https://admin.example.com/api")
///     .bearer_token("secret")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(client.url(), Some("https://admin.example.com/api"));
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    bearer_token: Option<String>,
    tls_config: TlsConfig,
    listing_config: ListingConfig,
    timeout: Option<Duration>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            bearer_token: None,
            tls_config: TlsConfig::default(),
            listing_config: ListingConfig::default(),
            timeout: None,
            _url_state: PhantomData,
        }
    }

    /// Sets the API base URL, e.g. `https://admin.example.com/api`.
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            bearer_token: self.bearer_token,
            tls_config: self.tls_config,
            listing_config: self.listing_config,
            timeout: self.timeout,
            _url_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ClientBuilder<U> {
    /// Sets the bearer token for every request.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables TLS certificate verification and allows plain HTTP.
    ///
    /// **WARNING**: only for local development.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Sets the listing configuration.
    #[must_use]
    pub fn listing_config(mut self, config: ListingConfig) -> Self {
        self.listing_config = config;
        self
    }

    /// Sets the request timeout. Without one, requests wait indefinitely.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ClientBuilder<HasUrl> {
    /// Builds the client.
    ///
    /// No request is made; the first network call happens on the first list.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if:
    /// - The URL is invalid
    /// - The URL is not HTTPS and [`insecure`](Self::insecure) was not set
    /// - The CA certificate cannot be loaded
    /// - The `rest` feature is disabled
    pub fn build(self) -> Result<Client, Error> {
        let url = self.url.ok_or_else(|| Error::configuration("URL is required"))?;

        let parsed_url = url::Url::parse(&url)
            .map_err(|e| Error::configuration(format!("invalid URL: {}", e)))?;

        if parsed_url.scheme() != "https" && !self.tls_config.skip_verification {
            return Err(Error::configuration(
                "HTTPS is required. Use .insecure() for development with HTTP.",
            ));
        }

        #[cfg(feature = "rest")]
        {
            let backend =
                crate::transport::RestBackend::new(parsed_url, &self.tls_config, self.timeout)?;
            if let Some(token) = self.bearer_token {
                backend.set_auth_token(token);
            }

            tracing::debug!(url = %url, timeout = ?self.timeout, "client built");
            Ok(Client::from_inner(super::inner::ClientInner::new(
                Some(url),
                std::sync::Arc::new(backend),
                self.listing_config,
            )))
        }

        #[cfg(not(feature = "rest"))]
        {
            let _ = (parsed_url, self.bearer_token, self.timeout, self.listing_config);
            Err(Error::configuration(
                "REST backend requested but 'rest' feature is not enabled",
            ))
        }
    }
}
