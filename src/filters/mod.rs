//! Filter state for listings, synchronized with the URL query string.
//!
//! - [`FilterSchema`]: accepted statuses, categories, sortable columns, defaults
//! - [`FilterState`]: the typed selection plus its query-string codec
//! - [`FilterStore`]: owns the state, writes it through a [`UrlSink`] and
//!   broadcasts committed changes
//!
//! The store never talks to the backend. A listing controller subscribes to
//! committed state and turns it into fetches.

mod schema;
mod state;
mod store;

pub use schema::{DEFAULT_PAGE_SIZE, FilterSchema};
pub use state::FilterState;
pub use store::{FilterStore, UrlSink};
