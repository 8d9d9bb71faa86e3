//! Configuration types for folio.
//!
//! - [`ListingConfig`]: search throttle, page size, delete confirmation
//! - [`TlsConfig`]: TLS/SSL settings for the REST backend

mod listing;
mod tls;

pub use listing::ListingConfig;
pub use tls::TlsConfig;
