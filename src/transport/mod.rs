//! Backend layer for back-office API communication.
//!
//! - [`Backend`]: one async method per endpoint shape, object safe
//! - [`RestBackend`]: HTTP/JSON via reqwest (feature `rest`)
//! - [`MockBackend`]: in-memory backend for tests
//!
//! Backends return the HTTP status and raw JSON body. Envelope handling and
//! error mapping live in [`ResourceClient`](crate::ResourceClient), so every
//! backend behaves the same way from the caller's point of view.

mod mock;
mod traits;

#[cfg(feature = "rest")]
mod rest;

pub use mock::{MockBackend, RecordedRequest};
pub use traits::{Backend, BackendResponse, Method};

#[cfg(feature = "rest")]
pub use rest::{RestBackend, RestBackendBuilder};
