//! In-memory URL location.

use parking_lot::RwLock;

use crate::filters::UrlSink;

/// A location whose query string lives in memory.
///
/// Records every write so tests can assert on URL history.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    query: RwLock<String>,
    writes: RwLock<Vec<String>>,
}

impl MemoryLocation {
    /// Creates a location at `query` (a leading `?` is stripped).
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: RwLock::new(query.trim_start_matches('?').to_string()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Current query string.
    pub fn query(&self) -> String {
        self.query.read().clone()
    }

    /// Every query written through [`UrlSink::replace_query`], oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.read().clone()
    }

    /// Moves to `query` as back/forward navigation would, without recording a
    /// write. Pair with [`FilterStore::sync_from_url`](crate::filters::FilterStore::sync_from_url).
    pub fn navigate(&self, query: impl Into<String>) {
        let query = query.into();
        *self.query.write() = query.trim_start_matches('?').to_string();
    }
}

impl UrlSink for MemoryLocation {
    fn current_query(&self) -> String {
        self.query()
    }

    fn replace_query(&self, query: &str) {
        *self.query.write() = query.to_string();
        self.writes.write().push(query.to_string());
    }
}
