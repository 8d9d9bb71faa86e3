//! Integration tests for folio.
//!
//! Every test drives the public API against a local [`wiremock`] server that
//! plays the back-office API, so no external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With request logging
//! RUST_LOG=folio=debug cargo test --test integration -- --nocapture
//! ```

mod client_tests;
mod common;
mod dialog_tests;
mod listing_tests;
mod row_action_tests;
