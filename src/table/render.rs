//! Pure table rendering.

use super::ColumnDef;
use crate::entities::Entity;
use crate::error::Result;
use crate::filters::{FilterState, FilterStore};
use crate::types::{EntityId, SortOrder};

/// The column the table is sorted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingState {
    /// Sorted column key.
    pub sort_by: String,
    /// Direction.
    pub sort_order: SortOrder,
}

impl SortingState {
    /// Creates a sorting state.
    pub fn new(sort_by: impl Into<String>, sort_order: SortOrder) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_order,
        }
    }

    /// Reads the sorting out of a filter state.
    pub fn from_filters(state: &FilterState) -> Self {
        Self::new(state.sort_by.clone(), state.sort_order)
    }

    /// The sorting after a header click on `column`: the same column flips,
    /// a new column starts descending.
    #[must_use]
    pub fn toggle(&self, column: &str) -> Self {
        if self.sort_by == column {
            Self::new(column, self.sort_order.toggled())
        } else {
            Self::new(column, SortOrder::Descending)
        }
    }

    /// The direction shown on `column`'s header, if it is the sorted one.
    pub fn indicator(&self, column: &str) -> Option<SortOrder> {
        (self.sort_by == column).then_some(self.sort_order)
    }
}

/// Applies a header click on `column` to `store`.
///
/// # Errors
///
/// Returns a [`Validation`](crate::ErrorKind::Validation) error if the
/// listing cannot be sorted on `column`; the store is left unchanged.
pub fn toggle_sort(store: &FilterStore, column: &str) -> Result<SortingState> {
    let next = SortingState::from_filters(&store.state()).toggle(column);
    store.set_sort(&next.sort_by, next.sort_order)?;
    Ok(next)
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: &'static str,
    /// Label.
    pub label: &'static str,
    /// Whether the header is clickable.
    pub sortable: bool,
    /// Sort direction indicator, on the sorted column only.
    pub sorted: Option<SortOrder>,
}

/// One body row, keyed by the record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Record id.
    pub id: EntityId,
    /// Cells, aligned with the headers.
    pub cells: Vec<String>,
}

/// A fully rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedTable {
    /// Header cells.
    pub headers: Vec<HeaderCell>,
    /// Body rows in item order.
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Renders `items` with `columns`.
///
/// Pure: same inputs, same table. Unsortable columns never carry an
/// indicator.
pub fn render<E: Entity>(
    items: &[E],
    columns: &[ColumnDef<E>],
    sorting: &SortingState,
) -> RenderedTable {
    let headers = columns
        .iter()
        .map(|column| HeaderCell {
            key: column.key,
            label: column.header,
            sortable: column.sortable,
            sorted: column
                .sortable
                .then(|| sorting.indicator(column.key))
                .flatten(),
        })
        .collect();

    let rows = items
        .iter()
        .map(|item| RenderedRow {
            id: item.id().clone(),
            cells: columns.iter().map(|c| c.render_cell(item)).collect(),
        })
        .collect();

    RenderedTable { headers, rows }
}
