//! Error types for the folio client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## Taxonomy
//!
//! | Source                         | Kinds                                              |
//! |--------------------------------|----------------------------------------------------|
//! | Network / transport            | `Transport`, `Connection`, `Timeout`               |
//! | Backend said no (`success: false` or HTTP error) | `Backend`, `NotFound`, `Conflict`, ... |
//! | Client-side validation         | `Validation`                                       |
//! | Malformed payload              | `InvalidResponse`                                  |
//!
//! Submitting a dialog whose confirmation or draft does not check out returns
//! `Validation` before any request is sent. Nothing in this crate retries.
//!
//! ```rust,ignore
//! match controller.refresh().await {
//!     ListingStatus::Error(message) => banner.show(message),
//!     _ => {}
//! }
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for folio operations.
pub type Result<T> = std::result::Result<T, Error>;
