//! Row-local UI flags.

use std::collections::{HashMap, HashSet};

use crate::types::EntityId;

/// UI flags owned by a single row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowUiState {
    /// Action menu is open.
    pub menu_open: bool,
    /// Delete confirmation dialog is open.
    pub delete_dialog_open: bool,
}

impl RowUiState {
    fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Row flags keyed by record id.
///
/// Rows without an entry are idle. Call [`sync_rows`](Self::sync_rows) after
/// every page change so flags of rows that left the page are dropped.
#[derive(Debug, Clone, Default)]
pub struct RowStates {
    rows: HashMap<EntityId, RowUiState>,
}

impl RowStates {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flags of `id`.
    pub fn get(&self, id: &EntityId) -> RowUiState {
        self.rows.get(id).copied().unwrap_or_default()
    }

    /// Opens the action menu of `id`, closing every other menu.
    pub fn open_menu(&mut self, id: &EntityId) {
        for (row_id, state) in &mut self.rows {
            if row_id != id {
                state.menu_open = false;
            }
        }
        self.rows.retain(|_, state| !state.is_idle());
        self.update(id, |state| state.menu_open = true);
    }

    /// Closes the action menu of `id`.
    pub fn close_menu(&mut self, id: &EntityId) {
        self.update(id, |state| state.menu_open = false);
    }

    /// Opens the delete dialog of `id` and closes its menu.
    pub fn open_delete_dialog(&mut self, id: &EntityId) {
        self.update(id, |state| {
            state.menu_open = false;
            state.delete_dialog_open = true;
        });
    }

    /// Closes the delete dialog of `id`.
    pub fn close_delete_dialog(&mut self, id: &EntityId) {
        self.update(id, |state| state.delete_dialog_open = false);
    }

    /// Drops flags of rows not in `ids`.
    pub fn sync_rows<'a>(&mut self, ids: impl IntoIterator<Item = &'a EntityId>) {
        let visible: HashSet<&EntityId> = ids.into_iter().collect();
        self.rows.retain(|id, _| visible.contains(id));
    }

    /// Number of rows with at least one flag set.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if every row is idle.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn update(&mut self, id: &EntityId, f: impl FnOnce(&mut RowUiState)) {
        let state = self.rows.entry(id.clone()).or_default();
        f(state);
        if state.is_idle() {
            self.rows.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> EntityId {
        EntityId::from(raw)
    }

    #[test]
    fn test_flags_are_per_row() {
        let mut rows = RowStates::new();
        rows.open_menu(&id("a"));
        assert!(rows.get(&id("a")).menu_open);
        assert!(!rows.get(&id("b")).menu_open);

        rows.open_menu(&id("b"));
        assert!(!rows.get(&id("a")).menu_open);
        assert!(rows.get(&id("b")).menu_open);
    }

    #[test]
    fn test_delete_dialog_closes_menu() {
        let mut rows = RowStates::new();
        rows.open_menu(&id("a"));
        rows.open_delete_dialog(&id("a"));
        assert_eq!(
            rows.get(&id("a")),
            RowUiState {
                menu_open: false,
                delete_dialog_open: true
            }
        );
        rows.close_delete_dialog(&id("a"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_sync_rows_prunes_departed_rows() {
        let mut rows = RowStates::new();
        rows.open_delete_dialog(&id("a"));
        rows.open_menu(&id("b"));

        let page = [id("b"), id("c")];
        rows.sync_rows(page.iter());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.get(&id("a")), RowUiState::default());
        assert!(rows.get(&id("b")).menu_open);
    }
}
