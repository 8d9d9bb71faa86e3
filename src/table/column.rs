//! Column definitions.

use std::sync::Arc;

use crate::entities::{
    Entity, EntityStatus, FeatureRequest, Message, Newsletter, Subscriber, format_timestamp,
    format_optional_timestamp,
};

type CellFn<E> = Arc<dyn Fn(&E) -> String + Send + Sync>;

/// One table column: accessor key, header, sortability and cell renderer.
///
/// The key doubles as the `sortBy` value sent to the backend.
pub struct ColumnDef<E> {
    /// Accessor key, e.g. `"createdAt"`.
    pub key: &'static str,
    /// Header label.
    pub header: &'static str,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    cell: CellFn<E>,
}

impl<E> Clone for ColumnDef<E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header,
            sortable: self.sortable,
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<E> std::fmt::Debug for ColumnDef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

impl<E> ColumnDef<E> {
    /// Creates a non-sortable column.
    pub fn new(
        key: &'static str,
        header: &'static str,
        cell: impl Fn(&E) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            header,
            sortable: false,
            cell: Arc::new(cell),
        }
    }

    /// Marks the column sortable.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Renders this column's cell for `item`.
    pub fn render_cell(&self, item: &E) -> String {
        (self.cell)(item)
    }
}

/// Built-in columns for a record type.
pub trait DefaultColumns: Entity {
    /// Columns in display order.
    fn columns() -> Vec<ColumnDef<Self>>;
}

fn status_column<E: Entity>() -> ColumnDef<E> {
    ColumnDef::new("status", "Status", |item: &E| item.status().label().to_string()).sortable()
}

impl DefaultColumns for Subscriber {
    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("email", "Email", |s: &Subscriber| s.email.clone()).sortable(),
            ColumnDef::new("name", "Name", |s: &Subscriber| {
                s.name.clone().unwrap_or_default()
            })
            .sortable(),
            status_column(),
            ColumnDef::new("source", "Source", |s: &Subscriber| {
                s.source.clone().unwrap_or_default()
            }),
            ColumnDef::new("subscribedAt", "Subscribed", |s: &Subscriber| {
                format_timestamp(&s.subscribed_at)
            })
            .sortable(),
        ]
    }
}

impl DefaultColumns for Message {
    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("name", "Name", |m: &Message| m.name.clone()).sortable(),
            ColumnDef::new("email", "Email", |m: &Message| m.email.clone()).sortable(),
            ColumnDef::new("subject", "Subject", |m: &Message| {
                m.subject.clone().unwrap_or_default()
            })
            .sortable(),
            status_column(),
            ColumnDef::new("createdAt", "Received", |m: &Message| {
                format_timestamp(&m.created_at)
            })
            .sortable(),
        ]
    }
}

impl DefaultColumns for FeatureRequest {
    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("title", "Title", |r: &FeatureRequest| r.title.clone()).sortable(),
            ColumnDef::new("category", "Category", |r: &FeatureRequest| {
                r.category.clone().unwrap_or_default()
            })
            .sortable(),
            status_column(),
            ColumnDef::new("votes", "Votes", |r: &FeatureRequest| r.votes.to_string()).sortable(),
            ColumnDef::new("createdAt", "Submitted", |r: &FeatureRequest| {
                format_timestamp(&r.created_at)
            })
            .sortable(),
        ]
    }
}

impl DefaultColumns for Newsletter {
    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("subject", "Subject", |n: &Newsletter| n.subject.clone()).sortable(),
            status_column(),
            ColumnDef::new("scheduledAt", "Scheduled", |n: &Newsletter| {
                format_optional_timestamp(n.scheduled_at.as_ref())
            })
            .sortable(),
            ColumnDef::new("sentAt", "Sent", |n: &Newsletter| {
                format_optional_timestamp(n.sent_at.as_ref())
            })
            .sortable(),
            ColumnDef::new("recipientCount", "Recipients", |n: &Newsletter| {
                n.recipient_count.map(|c| c.to_string()).unwrap_or_default()
            }),
        ]
    }
}
