//! Contact-form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Entity, EntityStatus, format_timestamp};
use crate::filters::FilterSchema;
use crate::types::{EntityId, SortOrder};

/// Triage state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStatus {
    /// Not yet opened.
    Unread,
    /// Opened.
    Read,
    /// Filed away.
    Archived,
}

impl EntityStatus for MessageStatus {
    const ALL: &'static [Self] = &[
        MessageStatus::Unread,
        MessageStatus::Read,
        MessageStatus::Archived,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "unread",
            MessageStatus::Read => "read",
            MessageStatus::Archived => "archived",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MessageStatus::Unread => "Unread",
            MessageStatus::Read => "Read",
            MessageStatus::Archived => "Archived",
        }
    }
}

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Backend identifier.
    pub id: EntityId,
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Subject line, if the form had one.
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Triage state.
    pub status: MessageStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Message counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageStats {
    /// All messages matching the filters.
    pub total: u64,
    /// Unread messages.
    pub unread: u64,
    /// Read messages.
    pub read: u64,
    /// Archived messages.
    pub archived: u64,
}

/// Partial update for a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessagePatch {
    /// New triage state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

impl Entity for Message {
    type Status = MessageStatus;
    type Stats = MessageStats;

    const RESOURCE: &'static str = "messages";
    const LABEL: &'static str = "Message";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> MessageStatus {
        self.status
    }

    fn export_headers() -> &'static [&'static str] {
        &["id", "name", "email", "subject", "message", "status", "createdAt"]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.subject.clone().unwrap_or_default(),
            self.message.clone(),
            self.status.as_str().to_string(),
            format_timestamp(&self.created_at),
        ]
    }

    fn filter_schema() -> FilterSchema {
        FilterSchema::builder()
            .statuses(MessageStatus::wire_values())
            .default_sort_by("createdAt")
            .default_sort_order(SortOrder::Descending)
            .sortable(vec!["name", "email", "subject", "status", "createdAt"])
            .build()
    }
}
