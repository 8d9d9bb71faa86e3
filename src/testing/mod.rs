//! Test doubles for code built on folio.
//!
//! - [`MockBackend`]: in-memory back-office API with failure injection and a
//!   request log
//! - [`MemoryLocation`]: a [`UrlSink`](crate::filters::UrlSink) that records
//!   every URL write
//! - [`RecordingNotifier`]: keeps every toast
//! - [`CountingRefresh`]: counts refresh calls
//!
//! ## Quick Start
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use std::sync::Arc;
//! use folio::prelude::*;
//! use folio::testing::{CountingRefresh, MockBackend, RecordingNotifier};
//!
//! let backend = Arc::new(MockBackend::new());
//! backend.fail_next_with(500, "Database unavailable");
//!
//! let client = Client::with_backend(backend.clone());
//! let notifier = Arc::new(RecordingNotifier::new());
//! let refresh = Arc::new(CountingRefresh::new());
//! let actions = RowActions::new(client.messages(), notifier.clone(), refresh.clone());
//!
//! let result = actions.delete(&EntityId::from("m1")).await;
//! assert!(result.is_err());
//! assert_eq!(notifier.messages(), vec!["Database unavailable".to_string()]);
//! assert_eq!(refresh.count(), 0);
//! # });
//! ```

mod location;
mod recorders;

pub use location::MemoryLocation;
pub use recorders::{CountingRefresh, RecordingNotifier};

pub use crate::transport::{MockBackend, RecordedRequest};
