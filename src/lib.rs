//! # folio
//!
//! Server-synchronized listings for the portfolio back-office API.
//!
//! Each back-office screen is a filtered, paginated table whose state lives in
//! the URL and whose data lives on the server. This crate implements that
//! pattern once, without a UI toolkit:
//!
//! - [`filters::FilterStore`]: search, status, categories, page and sort,
//!   mirrored to the URL query string
//! - [`fetcher::DataFetcher`]: one list call, normalized into items, stats and
//!   pagination
//! - [`listing::ListingController`]: the `Loading → Ready | Error` state machine
//! - [`table`]: pure rendering, sort toggling and per-row actions
//! - [`dialogs`]: typed-confirmation delete and validated edit dialogs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio::prelude::*;
//!
//! # struct BrowserLocation;
//! # impl UrlSink for BrowserLocation {
//! #     fn current_query(&self) -> String { String::new() }
//! #     fn replace_query(&self, _: &str) {}
//! # }
//! #[tokio::main]
//! async fn main() -> folio::Result<()> {
//!     let client = Client::from_env()?;
//!
//!     let store = FilterStore::for_entity::<Message>(
//!         Arc::new(BrowserLocation),
//!         client.listing_config().clone(),
//!     );
//!     let controller = ListingController::new(Arc::new(client.messages()));
//!     controller.bind(&store);
//!
//!     store.set_status(Some("unread"))?;
//!     let snapshot = controller.snapshot();
//!     println!("{:?}: {} messages", snapshot.status, snapshot.items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **The server owns the data**: mutations go through single-item
//!   endpoints and are followed by a refresh; rows are never patched in place
//! - **The store owns the URL**: nothing else writes the query string
//! - **Latest fetch wins**: overlapping fetches are ordered by generation and
//!   stale results are dropped
//! - **No retries**: every failure reaches the caller once, as an [`Error`]
//!
//! ## Features
//!
//! - `rest` (default): REST backend via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod types;

// Transport layer
pub mod transport;

// Listing pattern
pub mod dialogs;
pub mod export;
pub mod fetcher;
pub mod filters;
pub mod listing;
pub mod notify;
pub mod table;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder, ResourceClient};
pub use config::{ListingConfig, TlsConfig};
pub use error::{Error, ErrorKind, Result};
