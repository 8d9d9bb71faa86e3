//! Recording notifier and refresh counter.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::listing::Refresh;
use crate::notify::{Notifier, Toast};

/// A [`Notifier`] that keeps every toast.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: RwLock<Vec<Toast>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every toast so far, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.read().clone()
    }

    /// Messages of every toast so far.
    pub fn messages(&self) -> Vec<String> {
        self.toasts.read().iter().map(|t| t.message.clone()).collect()
    }

    /// Forgets recorded toasts.
    pub fn clear(&self) {
        self.toasts.write().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.write().push(toast);
    }
}

/// A [`Refresh`] that only counts calls.
#[derive(Debug, Default)]
pub struct CountingRefresh {
    count: AtomicU64,
}

impl CountingRefresh {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of refresh calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Refresh for CountingRefresh {
    async fn refresh(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
