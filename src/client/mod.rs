//! Client types for the back-office API.
//!
//! - [`Client`]: top-level handle, owns the backend and listing config
//! - [`ResourceClient`]: typed access to one resource's endpoints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn example() -> folio::Result<()> {
//! use folio::prelude::*;
//!
//! let client = Client::builder()
//!     .url("https://admin.example.com/api")
//!     .bearer_token("secret")
//!     .build()?;
//!
//! let params = ListParams::new().with("page", 1).with("pageSize", 10);
//! let page = client.subscribers().list(&params).await?;
//! println!("{} active subscribers", page.stats.active);
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;
mod resource;

pub use builder::{ClientBuilder, HasUrl, NoUrl};
pub use resource::ResourceClient;

use std::sync::Arc;
use std::time::Duration;

use crate::Error;
use crate::config::ListingConfig;
use crate::entities::{Entity, FeatureRequest, Message, Newsletter, Subscriber};
use crate::transport::Backend;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "FOLIO_API_URL";
/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "FOLIO_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "FOLIO_API_TIMEOUT_SECS";
/// Environment variable enabling plain HTTP and skipped verification.
pub const ENV_INSECURE: &str = "FOLIO_INSECURE";

/// The back-office API client.
///
/// `Client` is `Clone` and thread-safe; clones share one backend and its
/// connection pool.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use folio::Client;
/// use folio::testing::MockBackend;
///
/// let client = Client::with_backend(Arc::new(MockBackend::new()));
/// assert_eq!(client.backend().name(), "mock");
/// assert!(client.url().is_none());
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Creates a client over an existing backend with the default listing
    /// configuration.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self::from_inner(inner::ClientInner::new(
            None,
            backend,
            ListingConfig::default(),
        ))
    }

    /// Returns a copy of this client using `config` for listings.
    #[must_use]
    pub fn with_listing_config(&self, config: ListingConfig) -> Self {
        Self::from_inner(inner::ClientInner::new(
            self.inner.url.clone(),
            Arc::clone(&self.inner.backend),
            config,
        ))
    }

    /// Builds a client from `FOLIO_*` environment variables.
    ///
    /// | Variable                 | Meaning                          |
    /// |--------------------------|----------------------------------|
    /// | `FOLIO_API_URL`          | Base URL (required)              |
    /// | `FOLIO_API_TOKEN`        | Bearer token                     |
    /// | `FOLIO_API_TIMEOUT_SECS` | Request timeout in whole seconds |
    /// | `FOLIO_INSECURE`         | `1`/`true`/`yes`/`on` allows HTTP |
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`](crate::ErrorKind::Configuration)
    /// if the URL is missing or a value does not parse.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let url = lookup(ENV_API_URL)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::configuration(format!("{} is not set", ENV_API_URL)))?;

        let mut builder = Client::builder().url(url.trim());
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|t| !t.is_empty()) {
            builder = builder.bearer_token(token);
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                Error::configuration(format!(
                    "invalid {} value {:?}: {}",
                    ENV_API_TIMEOUT_SECS, raw, e
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if flag_value(lookup(ENV_INSECURE).as_deref()) {
            tracing::warn!("{} set, TLS verification disabled", ENV_INSECURE);
            builder = builder.insecure();
        }
        builder.build()
    }

    /// Returns the base URL, if the client was built from one.
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }

    /// Returns the backend.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.inner.backend
    }

    /// Returns the listing configuration.
    pub fn listing_config(&self) -> &ListingConfig {
        &self.inner.listing_config
    }

    /// Returns a typed client for any [`Entity`].
    pub fn resource<E: Entity>(&self) -> ResourceClient<E> {
        ResourceClient::new(Arc::clone(&self.inner.backend))
    }

    /// Newsletter subscribers.
    pub fn subscribers(&self) -> ResourceClient<Subscriber> {
        self.resource()
    }

    /// Contact-form messages.
    pub fn messages(&self) -> ResourceClient<Message> {
        self.resource()
    }

    /// Feature requests.
    pub fn feature_requests(&self) -> ResourceClient<FeatureRequest> {
        self.resource()
    }

    /// Newsletters.
    pub fn newsletters(&self) -> ResourceClient<Newsletter> {
        self.resource()
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url)
            .field("backend", &self.inner.backend.name())
            .finish_non_exhaustive()
    }
}

fn flag_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
