//! Table rendering and per-row actions.
//!
//! [`render`] is pure: items, columns and sorting in, a [`RenderedTable`]
//! out. Header clicks go back to the filter store through [`toggle_sort`].
//! Row menus keep their flags in [`RowStates`], and mutations run through
//! [`RowActions`].

mod actions;
mod column;
mod render;
mod rows;

pub use actions::RowActions;
pub use column::{ColumnDef, DefaultColumns};
pub use render::{HeaderCell, RenderedRow, RenderedTable, SortingState, render, toggle_sort};
pub use rows::{RowStates, RowUiState};
