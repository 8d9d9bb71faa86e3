//! Listing controller: owns the current page and keeps it in step with the
//! filters.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

use super::{ListingSnapshot, ListingStatus};
use crate::entities::Entity;
use crate::fetcher::DataFetcher;
use crate::filters::FilterStore;
use crate::types::ListParams;

/// Something that can re-run the current listing query.
///
/// Row actions and dialogs call this after a successful mutation.
#[async_trait::async_trait]
pub trait Refresh: Send + Sync {
    /// Re-fetches with the last-used parameters.
    async fn refresh(&self);
}

/// Drives the `Loading → Ready | Error` cycle of one listing.
///
/// Fetches are tagged with a generation number. Only the most recently issued
/// fetch may write state; anything older is dropped when it resolves.
///
/// Cloning is cheap and clones share state.
///
/// ## Example
///
/// ```rust
/// # tokio_test::block_on(async {
/// use std::sync::Arc;
/// use folio::prelude::*;
/// use folio::testing::MockBackend;
///
/// let client = Client::with_backend(Arc::new(MockBackend::new()));
/// let controller = ListingController::new(Arc::new(client.messages()));
///
/// let status = controller
///     .load(ListParams::new().with("page", 1).with("pageSize", 10))
///     .await;
/// assert_eq!(status, ListingStatus::Ready);
/// assert!(controller.snapshot().items.is_empty());
/// # });
/// ```
pub struct ListingController<E: Entity> {
    inner: Arc<ControllerInner<E>>,
}

impl<E: Entity> Clone for ListingController<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<E: Entity> {
    fetcher: Arc<dyn DataFetcher<E>>,
    route_defaults: ListParams,
    generation: AtomicU64,
    unmounted: AtomicBool,
    snapshot: watch::Sender<ListingSnapshot<E>>,
    binding: Mutex<Option<JoinHandle<()>>>,
}

impl<E: Entity> std::fmt::Debug for ListingController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingController")
            .field("resource", &E::RESOURCE)
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<E: Entity> ListingController<E> {
    /// Creates a controller that fetches through `fetcher`.
    pub fn new(fetcher: Arc<dyn DataFetcher<E>>) -> Self {
        Self::with_route_defaults(fetcher, ListParams::new())
    }

    /// Creates a controller whose fetches fall back to `route_defaults` for
    /// any key the filter state does not set.
    pub fn with_route_defaults(
        fetcher: Arc<dyn DataFetcher<E>>,
        route_defaults: ListParams,
    ) -> Self {
        let (snapshot, _) = watch::channel(ListingSnapshot::default());
        Self {
            inner: Arc::new(ControllerInner {
                fetcher,
                route_defaults,
                generation: AtomicU64::new(0),
                unmounted: AtomicBool::new(false),
                snapshot,
                binding: Mutex::new(None),
            }),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ListingSnapshot<E> {
        self.inner.snapshot.borrow().clone()
    }

    /// Returns the current lifecycle state.
    pub fn status(&self) -> ListingStatus {
        self.inner.snapshot.borrow().status.clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot<E>> {
        self.inner.snapshot.subscribe()
    }

    /// Fetches `params`, merged over the route defaults, unconditionally.
    ///
    /// Returns the state after this fetch settled. If a newer fetch was issued
    /// meanwhile, this fetch's result is dropped and the newer one's state is
    /// returned.
    pub async fn load(&self, params: ListParams) -> ListingStatus {
        let params = params.merge_defaults(&self.inner.route_defaults);
        self.inner.run(params).await
    }

    /// Fetches `params` only if they differ by value from the parameters of
    /// the last issued fetch.
    ///
    /// Returns `None` when nothing changed and no request was made.
    pub async fn apply_params(&self, params: ListParams) -> Option<ListingStatus> {
        let params = params.merge_defaults(&self.inner.route_defaults);
        if self.inner.snapshot.borrow().params.as_ref() == Some(&params) {
            tracing::debug!(resource = E::RESOURCE, "params unchanged, skipping fetch");
            return None;
        }
        Some(self.inner.run(params).await)
    }

    /// Re-fetches with the last-used parameters, or the route defaults if
    /// nothing was fetched yet.
    pub async fn refresh(&self) -> ListingStatus {
        let params = self
            .inner
            .snapshot
            .borrow()
            .params
            .clone()
            .unwrap_or_else(|| self.inner.route_defaults.clone());
        tracing::debug!(resource = E::RESOURCE, "refreshing");
        self.inner.run(params).await
    }

    /// Follows `store`: fetches its committed state now and again on every
    /// committed change, until [`unmount`](Self::unmount).
    ///
    /// Must be called inside a tokio runtime. Binding again replaces the
    /// previous binding, and binding after `unmount` mounts the listing again.
    pub fn bind(&self, store: &FilterStore) {
        let mut filters = store.subscribe();
        let weak: Weak<ControllerInner<E>> = Arc::downgrade(&self.inner);
        self.inner.unmounted.store(false, Ordering::SeqCst);

        let task = tokio::spawn(async move {
            // Dropping the set aborts fetches still in flight.
            let mut fetches = JoinSet::new();
            loop {
                while fetches.try_join_next().is_some() {}
                let params = filters.borrow_and_update().to_list_params();
                let Some(inner) = weak.upgrade() else { break };
                let controller = ListingController { inner };
                // Fetch in the background so a newer change can supersede it.
                fetches.spawn(async move {
                    controller.apply_params(params).await;
                });
                if filters.changed().await.is_err() {
                    while fetches.join_next().await.is_some() {}
                    break;
                }
            }
        });

        if let Some(previous) = self.inner.binding.lock().replace(task) {
            previous.abort();
        }
    }

    /// Stops following the store and discards every in-flight result.
    ///
    /// Until the next [`bind`](Self::bind), fetches are skipped and the
    /// snapshot keeps its last state.
    pub fn unmount(&self) {
        if let Some(task) = self.inner.binding.lock().take() {
            task.abort();
        }
        // Under the snapshot lock so no write can interleave with the flag.
        self.inner.snapshot.send_if_modified(|_| {
            self.inner.unmounted.store(true, Ordering::SeqCst);
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            false
        });
        tracing::debug!(resource = E::RESOURCE, "listing unmounted");
    }
}

impl<E: Entity> ControllerInner<E> {
    /// `true` if a fetch tagged `generation` may still write state.
    fn is_current(&self, generation: u64) -> bool {
        !self.unmounted.load(Ordering::SeqCst)
            && self.generation.load(Ordering::SeqCst) == generation
    }

    fn status(&self) -> ListingStatus {
        self.snapshot.borrow().status.clone()
    }

    async fn run(&self, params: ListParams) -> ListingStatus {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let issued = self.snapshot.send_if_modified(|snapshot| {
            if !self.is_current(generation) {
                return false;
            }
            snapshot.begin(generation, params.clone());
            true
        });
        if !issued {
            tracing::debug!(resource = E::RESOURCE, generation, "fetch skipped");
            return self.status();
        }
        tracing::debug!(resource = E::RESOURCE, generation, params = %params, "fetch issued");

        let result = self.fetcher.fetch(&params).await;

        let written = self.snapshot.send_if_modified(|snapshot| {
            if !self.is_current(generation) {
                return false;
            }
            match result {
                Ok(page) => {
                    tracing::debug!(
                        resource = E::RESOURCE,
                        generation,
                        items = page.len(),
                        "listing ready"
                    );
                    snapshot.resolve(page);
                }
                Err(err) => {
                    tracing::warn!(
                        resource = E::RESOURCE,
                        generation,
                        error = %err,
                        "listing failed"
                    );
                    snapshot.reject(err.message());
                }
            }
            true
        });
        if !written {
            tracing::debug!(resource = E::RESOURCE, generation, "stale fetch dropped");
        }
        self.status()
    }
}

impl<E: Entity> Drop for ControllerInner<E> {
    fn drop(&mut self) {
        if let Some(task) = self.binding.get_mut().take() {
            task.abort();
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> Refresh for ListingController<E> {
    async fn refresh(&self) {
        ListingController::refresh(self).await;
    }
}
