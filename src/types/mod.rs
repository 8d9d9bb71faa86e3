//! Core types shared by every listing.
//!
//! - [`EntityId`]: backend-assigned, immutable record identifier
//! - [`Envelope`]: the `{success, data, metadata, error}` response wrapper
//! - [`PaginationMeta`]: page counters returned with every list call
//! - [`SortOrder`]: `asc` / `desc`
//! - [`ListParams`]: the flat query-parameter map sent to list endpoints

mod envelope;
mod id;
mod pagination;
mod params;
mod sort;

pub use envelope::{ApiError, DeletedData, Envelope, ListData, ListMetadata, ListPage};
pub use id::EntityId;
pub use pagination::PaginationMeta;
pub use params::ListParams;
pub use sort::SortOrder;
