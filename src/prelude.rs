//! Prelude module for convenient imports.
//!
//! ```rust
//! use folio::prelude::*;
//! ```
//!
//! This provides access to:
//! - Client types
//! - Error types
//! - The listing pattern: store, controller, table, dialogs
//! - Entities and their patches

pub use crate::{
    client::{Client, ClientBuilder, ResourceClient},
    config::{ListingConfig, TlsConfig},
    dialogs::{DeleteDialog, DialogPhase, EditDialog},
    entities::{
        Entity, EntityStatus, FeatureRequest, FeatureRequestPatch, FeatureRequestStatus, Message,
        MessagePatch, MessageStatus, Newsletter, NewsletterDraft, NewsletterPatch,
        NewsletterStatus, Subscriber, SubscriberPatch, SubscriberStatus,
    },
    error::{Error, ErrorKind, Result},
    export::ExportFormat,
    fetcher::{DataFetcher, EntityPage},
    filters::{FilterSchema, FilterState, FilterStore, UrlSink},
    listing::{ListingController, ListingSnapshot, ListingStatus, Refresh},
    notify::{Notifier, Toast, ToastKind, TracingNotifier},
    table::{ColumnDef, DefaultColumns, RowActions, RowStates, SortingState, render},
    transport::Backend,
    types::{EntityId, ListParams, PaginationMeta, SortOrder},
};
