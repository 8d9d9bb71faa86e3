//! Back-office record types and the traits that let listings work over them.
//!
//! Each entity is a backend-owned record with an immutable [`EntityId`], a
//! closed status enum and a stats summary returned alongside list pages.
//!
//! ## Implementing a listing for a new record type
//!
//! ```rust
//! use folio::entities::{Entity, EntityStatus};
//! use folio::types::EntityId;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
//! #[serde(rename_all = "kebab-case")]
//! enum TicketStatus { Open, Closed }
//!
//! impl EntityStatus for TicketStatus {
//!     const ALL: &'static [Self] = &[TicketStatus::Open, TicketStatus::Closed];
//!     fn as_str(&self) -> &'static str {
//!         match self { TicketStatus::Open => "open", TicketStatus::Closed => "closed" }
//!     }
//!     fn label(&self) -> &'static str {
//!         match self { TicketStatus::Open => "Open", TicketStatus::Closed => "Closed" }
//!     }
//! }
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Ticket { id: EntityId, title: String, status: TicketStatus }
//!
//! impl Entity for Ticket {
//!     type Status = TicketStatus;
//!     type Stats = serde_json::Value;
//!     const RESOURCE: &'static str = "tickets";
//!     const LABEL: &'static str = "Ticket";
//!     fn id(&self) -> &EntityId { &self.id }
//!     fn status(&self) -> TicketStatus { self.status }
//!     fn export_headers() -> &'static [&'static str] { &["id", "title", "status"] }
//!     fn export_row(&self) -> Vec<String> {
//!         vec![self.id.to_string(), self.title.clone(), self.status.as_str().into()]
//!     }
//! }
//!
//! assert_eq!(Ticket::filter_schema().statuses, vec!["open", "closed"]);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::filters::FilterSchema;
use crate::types::EntityId;

mod feature_request;
mod message;
mod newsletter;
mod subscriber;

pub use feature_request::{
    FEATURE_CATEGORIES, FeatureRequest, FeatureRequestPatch, FeatureRequestStats,
    FeatureRequestStatus,
};
pub use message::{Message, MessagePatch, MessageStats, MessageStatus};
pub use newsletter::{
    Newsletter, NewsletterDraft, NewsletterPatch, NewsletterStats, NewsletterStatus,
};
pub use subscriber::{Subscriber, SubscriberPatch, SubscriberStats, SubscriberStatus};

/// A closed set of lifecycle states for one entity type.
///
/// Wire values are lowercase, kebab-case for multi-word states.
pub trait EntityStatus:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every state, in display order.
    const ALL: &'static [Self];

    /// Returns the wire value (`"in-progress"`).
    fn as_str(&self) -> &'static str;

    /// Returns the human label (`"In progress"`).
    fn label(&self) -> &'static str;

    /// Parses a wire value, ignoring case and surrounding whitespace.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw))
    }

    /// Returns every wire value, in display order.
    fn wire_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

/// A backend-owned record that can be listed, patched and deleted.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Lifecycle states of this record type.
    type Status: EntityStatus;

    /// Aggregate counters returned with list pages.
    type Stats: Clone + Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Resource path segment (`"subscribers"`).
    const RESOURCE: &'static str;

    /// Singular human label used in toasts (`"Subscriber"`).
    const LABEL: &'static str;

    /// Returns the backend-assigned identifier.
    fn id(&self) -> &EntityId;

    /// Returns the current status.
    fn status(&self) -> Self::Status;

    /// Column headers for export.
    fn export_headers() -> &'static [&'static str];

    /// One export row, aligned with [`export_headers`](Entity::export_headers).
    fn export_row(&self) -> Vec<String>;

    /// Filter dimensions accepted by this record type's list endpoint.
    fn filter_schema() -> FilterSchema {
        FilterSchema::builder()
            .statuses(<Self::Status as EntityStatus>::wire_values())
            .build()
    }
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub(crate) fn format_optional_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_timestamp).unwrap_or_default()
}
