//! Feature requests submitted by users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Entity, EntityStatus, format_optional_timestamp, format_timestamp};
use crate::filters::FilterSchema;
use crate::types::{EntityId, SortOrder};

/// Categories a feature request can be filed under.
pub const FEATURE_CATEGORIES: &[&str] = &["ui", "performance", "integration", "content", "other"];

/// Review state of a feature request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureRequestStatus {
    /// Awaiting review.
    Pending,
    /// Accepted and being built.
    InProgress,
    /// Shipped.
    Completed,
    /// Declined.
    Rejected,
}

impl EntityStatus for FeatureRequestStatus {
    const ALL: &'static [Self] = &[
        FeatureRequestStatus::Pending,
        FeatureRequestStatus::InProgress,
        FeatureRequestStatus::Completed,
        FeatureRequestStatus::Rejected,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            FeatureRequestStatus::Pending => "pending",
            FeatureRequestStatus::InProgress => "in-progress",
            FeatureRequestStatus::Completed => "completed",
            FeatureRequestStatus::Rejected => "rejected",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FeatureRequestStatus::Pending => "Pending",
            FeatureRequestStatus::InProgress => "In progress",
            FeatureRequestStatus::Completed => "Completed",
            FeatureRequestStatus::Rejected => "Rejected",
        }
    }
}

/// A feature request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    /// Backend identifier.
    pub id: EntityId,
    /// Short title.
    pub title: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Category, one of [`FEATURE_CATEGORIES`].
    #[serde(default)]
    pub category: Option<String>,
    /// Review state.
    pub status: FeatureRequestStatus,
    /// Upvotes.
    #[serde(default)]
    pub votes: u32,
    /// Submitter email, if left.
    #[serde(default)]
    pub email: Option<String>,
    /// Internal notes from the reviewer.
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last change.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Feature request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureRequestStats {
    /// All requests matching the filters.
    pub total: u64,
    /// Awaiting review.
    pub pending: u64,
    /// Being built.
    pub in_progress: u64,
    /// Shipped.
    pub completed: u64,
    /// Declined.
    pub rejected: u64,
}

/// Partial update for a feature request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequestPatch {
    /// New review state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureRequestStatus>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub category: Option<String>,
    /// Reviewer notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub admin_notes: Option<String>,
}

impl Entity for FeatureRequest {
    type Status = FeatureRequestStatus;
    type Stats = FeatureRequestStats;

    const RESOURCE: &'static str = "feature-requests";
    const LABEL: &'static str = "Feature request";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> FeatureRequestStatus {
        self.status
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "id",
            "title",
            "category",
            "status",
            "votes",
            "email",
            "createdAt",
            "updatedAt",
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.category.clone().unwrap_or_default(),
            self.status.as_str().to_string(),
            self.votes.to_string(),
            self.email.clone().unwrap_or_default(),
            format_timestamp(&self.created_at),
            format_optional_timestamp(self.updated_at.as_ref()),
        ]
    }

    fn filter_schema() -> FilterSchema {
        FilterSchema::builder()
            .statuses(FeatureRequestStatus::wire_values())
            .categories(FEATURE_CATEGORIES.to_vec())
            .default_sort_by("createdAt")
            .default_sort_order(SortOrder::Descending)
            .sortable(vec!["title", "category", "status", "votes", "createdAt"])
            .build()
    }
}
