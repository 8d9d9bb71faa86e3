//! Newsletter subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Entity, EntityStatus, format_optional_timestamp, format_timestamp};
use crate::filters::FilterSchema;
use crate::types::{EntityId, SortOrder};

/// Subscription state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriberStatus {
    /// Receives newsletters.
    Active,
    /// Opted out.
    Unsubscribed,
}

impl EntityStatus for SubscriberStatus {
    const ALL: &'static [Self] = &[SubscriberStatus::Active, SubscriberStatus::Unsubscribed];

    fn as_str(&self) -> &'static str {
        match self {
            SubscriberStatus::Active => "active",
            SubscriberStatus::Unsubscribed => "unsubscribed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SubscriberStatus::Active => "Active",
            SubscriberStatus::Unsubscribed => "Unsubscribed",
        }
    }
}

/// A newsletter subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// Backend identifier.
    pub id: EntityId,
    /// Subscriber email address.
    pub email: String,
    /// Display name, if given at signup.
    #[serde(default)]
    pub name: Option<String>,
    /// Subscription state.
    pub status: SubscriberStatus,
    /// Where the signup came from (`"footer"`, `"blog"`).
    #[serde(default)]
    pub source: Option<String>,
    /// Signup time.
    pub subscribed_at: DateTime<Utc>,
    /// Opt-out time.
    #[serde(default)]
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

/// Subscriber counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriberStats {
    /// All subscribers matching the filters.
    pub total: u64,
    /// Active subscribers.
    pub active: u64,
    /// Unsubscribed subscribers.
    pub unsubscribed: u64,
}

/// Partial update for a subscriber.
///
/// Unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberPatch {
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriberStatus>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
}

impl SubscriberPatch {
    /// A patch that only changes the status.
    pub fn status(status: SubscriberStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Entity for Subscriber {
    type Status = SubscriberStatus;
    type Stats = SubscriberStats;

    const RESOURCE: &'static str = "subscribers";
    const LABEL: &'static str = "Subscriber";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> SubscriberStatus {
        self.status
    }

    fn export_headers() -> &'static [&'static str] {
        &["id", "email", "name", "status", "source", "subscribedAt", "unsubscribedAt"]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.email.clone(),
            self.name.clone().unwrap_or_default(),
            self.status.as_str().to_string(),
            self.source.clone().unwrap_or_default(),
            format_timestamp(&self.subscribed_at),
            format_optional_timestamp(self.unsubscribed_at.as_ref()),
        ]
    }

    fn filter_schema() -> FilterSchema {
        FilterSchema::builder()
            .statuses(SubscriberStatus::wire_values())
            .default_sort_by("subscribedAt")
            .default_sort_order(SortOrder::Descending)
            .sortable(vec!["email", "name", "status", "subscribedAt"])
            .build()
    }
}
