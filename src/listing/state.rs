//! Observable listing state.

use crate::entities::Entity;
use crate::fetcher::EntityPage;
use crate::types::{ListParams, PaginationMeta};

/// Lifecycle of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingStatus {
    /// A fetch is in flight.
    #[default]
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; the message is safe to show as-is.
    Error(String),
}

impl ListingStatus {
    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, ListingStatus::Loading)
    }

    /// Returns `true` after a successful fetch.
    pub fn is_ready(&self) -> bool {
        matches!(self, ListingStatus::Ready)
    }

    /// Returns the error message, if the last fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ListingStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything a view needs to draw one listing.
///
/// Items, stats and pagination are those of the last successful fetch; they
/// stay in place while a newer fetch is loading or after it failed.
#[derive(Debug, Clone)]
pub struct ListingSnapshot<E: Entity> {
    /// Current lifecycle state.
    pub status: ListingStatus,
    /// Records of the current page, in backend order.
    pub items: Vec<E>,
    /// Aggregate counters.
    pub stats: E::Stats,
    /// Page counters, absent until the first successful fetch.
    pub pagination: Option<PaginationMeta>,
    /// Parameters of the most recently issued fetch.
    pub params: Option<ListParams>,
    /// Generation of the most recently issued fetch.
    pub generation: u64,
}

impl<E: Entity> Default for ListingSnapshot<E> {
    fn default() -> Self {
        Self {
            status: ListingStatus::Loading,
            items: Vec::new(),
            stats: E::Stats::default(),
            pagination: None,
            params: None,
            generation: 0,
        }
    }
}

impl<E: Entity> ListingSnapshot<E> {
    /// Enters `Loading` for a newly issued fetch.
    pub(crate) fn begin(&mut self, generation: u64, params: ListParams) {
        self.status = ListingStatus::Loading;
        self.generation = generation;
        self.params = Some(params);
    }

    /// Replaces the page wholesale and enters `Ready`.
    pub(crate) fn resolve(&mut self, page: EntityPage<E>) {
        self.items = page.items;
        self.stats = page.stats;
        self.pagination = Some(page.pagination);
        self.status = ListingStatus::Ready;
    }

    /// Enters `Error`, keeping the previous page.
    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        self.status = ListingStatus::Error(message.into());
    }

    /// Ids of the records on the current page.
    pub fn ids(&self) -> impl Iterator<Item = &crate::types::EntityId> {
        self.items.iter().map(|item| item.id())
    }
}
