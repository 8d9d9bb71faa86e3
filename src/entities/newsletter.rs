//! Newsletter issues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Entity, EntityStatus, format_optional_timestamp, format_timestamp};
use crate::filters::FilterSchema;
use crate::types::{EntityId, SortOrder};

/// Delivery state of a newsletter issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewsletterStatus {
    /// Being written.
    Draft,
    /// Queued for a future send.
    Scheduled,
    /// Delivered.
    Sent,
}

impl EntityStatus for NewsletterStatus {
    const ALL: &'static [Self] = &[
        NewsletterStatus::Draft,
        NewsletterStatus::Scheduled,
        NewsletterStatus::Sent,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            NewsletterStatus::Draft => "draft",
            NewsletterStatus::Scheduled => "scheduled",
            NewsletterStatus::Sent => "sent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            NewsletterStatus::Draft => "Draft",
            NewsletterStatus::Scheduled => "Scheduled",
            NewsletterStatus::Sent => "Sent",
        }
    }
}

/// A newsletter issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsletter {
    /// Backend identifier.
    pub id: EntityId,
    /// Subject line.
    pub subject: String,
    /// Body, as stored by the backend.
    #[serde(default)]
    pub content: String,
    /// Delivery state.
    pub status: NewsletterStatus,
    /// Planned send time.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Actual send time.
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    /// Number of subscribers it went to.
    #[serde(default)]
    pub recipient_count: Option<u64>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Newsletter counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsletterStats {
    /// All issues matching the filters.
    pub total: u64,
    /// Drafts.
    pub draft: u64,
    /// Scheduled issues.
    pub scheduled: u64,
    /// Sent issues.
    pub sent: u64,
}

/// A new newsletter issue, sent with `POST /newsletters`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterDraft {
    /// Subject line.
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub subject: String,
    /// Body.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
}

/// Partial update for a newsletter issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterPatch {
    /// New subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub subject: Option<String>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: Option<String>,
    /// New delivery state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NewsletterStatus>,
    /// Planned send time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl NewsletterPatch {
    /// A patch that queues the issue for `at`.
    pub fn schedule(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(NewsletterStatus::Scheduled),
            scheduled_at: Some(at),
            ..Self::default()
        }
    }
}

impl Entity for Newsletter {
    type Status = NewsletterStatus;
    type Stats = NewsletterStats;

    const RESOURCE: &'static str = "newsletters";
    const LABEL: &'static str = "Newsletter";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> NewsletterStatus {
        self.status
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "id",
            "subject",
            "status",
            "scheduledAt",
            "sentAt",
            "recipientCount",
            "createdAt",
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.subject.clone(),
            self.status.as_str().to_string(),
            format_optional_timestamp(self.scheduled_at.as_ref()),
            format_optional_timestamp(self.sent_at.as_ref()),
            self.recipient_count.map(|n| n.to_string()).unwrap_or_default(),
            format_timestamp(&self.created_at),
        ]
    }

    fn filter_schema() -> FilterSchema {
        FilterSchema::builder()
            .statuses(NewsletterStatus::wire_values())
            .default_sort_by("createdAt")
            .default_sort_order(SortOrder::Descending)
            .sortable(vec!["subject", "status", "scheduledAt", "sentAt", "createdAt"])
            .build()
    }
}
