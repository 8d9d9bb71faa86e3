//! The filter state store: in-memory state mirrored to the URL.

use std::collections::BTreeSet;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;

use super::{FilterSchema, FilterState};
use crate::config::ListingConfig;
use crate::entities::Entity;
use crate::error::{Error, Result};
use crate::types::SortOrder;

/// Where the store persists its state, typically the browser location.
///
/// Only the filter store writes through a sink.
pub trait UrlSink: Send + Sync {
    /// Returns the current query string, without the leading `?`.
    fn current_query(&self) -> String;

    /// Replaces the query string without adding a history entry.
    fn replace_query(&self, query: &str);
}

/// Holds the filter state of one listing and keeps it in sync with the URL.
///
/// Every setter updates the in-memory state immediately, resets the page to 1
/// (except [`set_page`](FilterStore::set_page)) and commits: the URL is
/// rewritten and subscribers see the new state. Search is the exception: it
/// commits only after input pauses for
/// [`ListingConfig::search_throttle`]. Any other commit flushes a pending
/// search.
///
/// Cloning is cheap and clones share state.
///
/// ```rust
/// # tokio_test::block_on(async {
/// use std::sync::Arc;
/// use folio::filters::{FilterSchema, FilterStore};
/// use folio::testing::MemoryLocation;
///
/// let location = Arc::new(MemoryLocation::new("page=3&status=read"));
/// let schema = FilterSchema::builder().statuses(vec!["read", "unread"]).build();
/// let store = FilterStore::new(schema, location.clone());
///
/// assert_eq!(store.state().page, 3);
/// store.set_status(Some("unread")).unwrap();
/// assert_eq!(store.state().page, 1);
/// assert_eq!(location.query(), "status=unread");
/// # });
/// ```
#[derive(Clone)]
pub struct FilterStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    schema: FilterSchema,
    config: ListingConfig,
    sink: Arc<dyn UrlSink>,
    state: Mutex<DraftState>,
    committed: watch::Sender<FilterState>,
}

struct DraftState {
    current: FilterState,
    /// Bumped on every search keystroke and every commit; a debounce timer
    /// only commits if the generation it captured is still current.
    search_generation: u64,
    search_pending: bool,
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("state", &self.state())
            .field("search_pending", &self.has_pending_search())
            .finish_non_exhaustive()
    }
}

impl FilterStore {
    /// Creates a store with the default [`ListingConfig`], reading the
    /// initial state from `sink`.
    pub fn new(schema: FilterSchema, sink: Arc<dyn UrlSink>) -> Self {
        Self::with_config(schema, sink, ListingConfig::default())
    }

    /// Creates a store for entity `E`'s schema.
    pub fn for_entity<E: Entity>(sink: Arc<dyn UrlSink>, config: ListingConfig) -> Self {
        Self::with_config(E::filter_schema(), sink, config)
    }

    /// Creates a store, reading the initial state from `sink`.
    pub fn with_config(
        mut schema: FilterSchema,
        sink: Arc<dyn UrlSink>,
        config: ListingConfig,
    ) -> Self {
        schema
            .default_page_size
            .get_or_insert(config.default_page_size.max(1));
        let initial = FilterState::from_query(&sink.current_query(), &schema);
        let (committed, _) = watch::channel(initial.clone());

        Self {
            inner: Arc::new(StoreInner {
                schema,
                config,
                sink,
                state: Mutex::new(DraftState {
                    current: initial,
                    search_generation: 0,
                    search_pending: false,
                }),
                committed,
            }),
        }
    }

    /// Returns the schema this store validates against.
    pub fn schema(&self) -> &FilterSchema {
        &self.inner.schema
    }

    /// Returns the live state, including search text not yet committed.
    pub fn state(&self) -> FilterState {
        self.inner.state.lock().current.clone()
    }

    /// Returns the last committed state.
    pub fn committed(&self) -> FilterState {
        self.inner.committed.borrow().clone()
    }

    /// Subscribes to committed state changes.
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.inner.committed.subscribe()
    }

    /// Returns `true` while a search edit is waiting out the throttle window.
    pub fn has_pending_search(&self) -> bool {
        self.inner.state.lock().search_pending
    }

    /// Sets the search text. Commits once input pauses.
    pub fn set_search(&self, search: impl Into<String>) {
        let generation = {
            let mut draft = self.inner.state.lock();
            draft.current.search = search.into();
            draft.current.page = 1;
            draft.search_generation += 1;
            draft.search_pending = true;
            draft.search_generation
        };

        let delay = self.inner.config.search_throttle;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.commit_search(generation);
                    }
                });
            }
            Err(_) => {
                tracing::debug!("no async runtime, committing search without throttle");
                self.inner.commit_search(generation);
            }
        }
    }

    /// Commits pending search text now.
    pub fn flush_search(&self) {
        let generation = self.inner.state.lock().search_generation;
        self.inner.commit_search(generation);
    }

    /// Sets or clears the status filter.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the listing does not accept `status`.
    pub fn set_status(&self, status: Option<&str>) -> Result<()> {
        let status = match status {
            Some(raw) => Some(
                self.inner
                    .schema
                    .canonical_status(raw)
                    .ok_or_else(|| Error::validation(format!("unknown status `{}`", raw)))?
                    .to_string(),
            ),
            None => None,
        };
        self.inner.update(|state| state.status = status);
        Ok(())
    }

    /// Adds `category` to the selection, or removes it if already selected.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the listing does not accept `category`.
    pub fn toggle_category(&self, category: &str) -> Result<()> {
        let category = self.canonical_category(category)?;
        self.inner.update(|state| {
            if !state.categories.remove(&category) {
                state.categories.insert(category);
            }
        });
        Ok(())
    }

    /// Replaces the category selection.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first unaccepted category; the
    /// state is left unchanged.
    pub fn set_categories<I, S>(&self, categories: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories: BTreeSet<String> = categories
            .into_iter()
            .map(|c| self.canonical_category(c.as_ref()))
            .collect::<Result<_>>()?;
        self.inner.update(|state| state.categories = categories);
        Ok(())
    }

    /// Moves to `page`. Pages below 1 clamp to 1.
    pub fn set_page(&self, page: u32) {
        let page = page.max(1);
        self.inner.commit_with(|state| state.page = page);
    }

    /// Changes the page size. Zero clamps to 1.
    pub fn set_page_size(&self, page_size: u32) {
        let page_size = page_size.max(1);
        self.inner.update(|state| state.page_size = page_size);
    }

    /// Sorts on `sort_by` in `order`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the column is not sortable.
    pub fn set_sort(&self, sort_by: &str, order: SortOrder) -> Result<()> {
        if !self.inner.schema.allows_sort_by(sort_by) {
            return Err(Error::validation(format!(
                "column `{}` is not sortable",
                sort_by
            )));
        }
        let sort_by = sort_by.to_string();
        self.inner.update(|state| {
            state.sort_by = sort_by;
            state.sort_order = order;
        });
        Ok(())
    }

    /// Restores every dimension to its default in a single commit and drops
    /// any pending search.
    pub fn reset_filters(&self) {
        let defaults = FilterState::defaults(&self.inner.schema);
        self.inner.commit_with(|state| *state = defaults);
    }

    /// Re-reads state from a URL query string, as after back/forward
    /// navigation. The URL itself is not rewritten.
    pub fn sync_from_url(&self, query: &str) {
        let state = FilterState::from_query(query, &self.inner.schema);
        {
            let mut draft = self.inner.state.lock();
            draft.current = state.clone();
            draft.search_generation += 1;
            draft.search_pending = false;
        }
        tracing::debug!(query, "filter state re-read from url");
        self.inner.committed.send_if_modified(|committed| {
            let changed = *committed != state;
            *committed = state;
            changed
        });
    }

    fn canonical_category(&self, raw: &str) -> Result<String> {
        self.inner
            .schema
            .canonical_category(raw)
            .map(str::to_string)
            .ok_or_else(|| Error::validation(format!("unknown category `{}`", raw)))
    }
}

impl StoreInner {
    /// Applies a filter change: resets the page and commits.
    fn update(&self, f: impl FnOnce(&mut FilterState)) {
        self.commit_with(|state| {
            f(state);
            state.page = 1;
        });
    }

    /// Applies `f` and commits, flushing any pending search.
    fn commit_with(&self, f: impl FnOnce(&mut FilterState)) {
        let snapshot = {
            let mut draft = self.state.lock();
            f(&mut draft.current);
            draft.search_generation += 1;
            draft.search_pending = false;
            draft.current.clone()
        };
        self.publish(snapshot);
    }

    fn commit_search(&self, generation: u64) {
        let snapshot = {
            let mut draft = self.state.lock();
            if !draft.search_pending || draft.search_generation != generation {
                return;
            }
            draft.search_pending = false;
            draft.current.clone()
        };
        tracing::debug!(search = %snapshot.search, "search committed");
        self.publish(snapshot);
    }

    fn publish(&self, state: FilterState) {
        let query = state.to_query(&self.schema);
        self.sink.replace_query(&query);
        self.committed.send_if_modified(|committed| {
            let changed = *committed != state;
            *committed = state;
            changed
        });
    }
}
