//! Shared state behind a [`Client`](super::Client).

use std::sync::Arc;

use crate::config::ListingConfig;
use crate::transport::Backend;

pub(crate) struct ClientInner {
    /// Base URL, absent for injected backends.
    pub url: Option<String>,

    /// Backend every resource client sends through.
    pub backend: Arc<dyn Backend>,

    /// Listing tunables handed to stores and dialogs.
    pub listing_config: ListingConfig,
}

impl ClientInner {
    pub(crate) fn new(
        url: Option<String>,
        backend: Arc<dyn Backend>,
        listing_config: ListingConfig,
    ) -> Self {
        Self {
            url,
            backend,
            listing_config,
        }
    }
}
