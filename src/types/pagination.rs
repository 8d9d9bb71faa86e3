//! Page counters returned with every list response.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Pagination metadata for one list response.
///
/// The backend produces a fresh value on every list call and it replaces the
/// previous one wholesale. Derived fields always satisfy:
///
/// - `total_pages == ceil(total_items / page_size)`
/// - `has_next_page == page < total_pages`
/// - `has_previous_page == page > 1`
///
/// ```rust
/// use folio::types::PaginationMeta;
///
/// let meta = PaginationMeta::new(2, 10, 25);
/// assert_eq!(meta.total_pages, 3);
/// assert!(meta.has_next_page);
/// assert!(meta.has_previous_page);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page, 1-based.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Items across all pages.
    pub total_items: u64,
    /// Number of pages.
    #[serde(default)]
    pub total_pages: u64,
    /// Whether a page after this one exists.
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether a page before this one exists.
    #[serde(default)]
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Creates metadata with derived fields computed from the inputs.
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        let page = page.max(1);
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size))
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next_page: u64::from(page) < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Returns `true` if the derived fields agree with the inputs.
    pub fn is_consistent(&self) -> bool {
        self.page_size > 0 && *self == Self::new(self.page, self.page_size, self.total_items)
    }

    /// Recomputes derived fields from `page`, `page_size` and `total_items`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse)
    /// if `page_size` is zero.
    pub fn normalized(self) -> Result<Self, Error> {
        if self.page_size == 0 {
            return Err(Error::invalid_response("pagination pageSize must be positive"));
        }
        let normalized = Self::new(self.page, self.page_size, self.total_items);
        if normalized != self {
            tracing::warn!(
                page = self.page,
                page_size = self.page_size,
                total_items = self.total_items,
                reported_total_pages = self.total_pages,
                "backend pagination disagrees with totals, recomputing"
            );
        }
        Ok(normalized)
    }

    /// Returns the next page number, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.page.checked_add(1).filter(|_| self.has_next_page)
    }

    /// Returns the previous page number, if any.
    pub fn previous_page(&self) -> Option<u32> {
        self.page
            .checked_sub(1)
            .filter(|p| *p > 0 && self.has_previous_page)
    }

    /// Returns the 1-based inclusive range of items shown on this page, or
    /// `None` when the page is past the end.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        let first = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size) + 1;
        if first > self.total_items {
            return None;
        }
        let last = (first + u64::from(self.page_size) - 1).min(self.total_items);
        Some((first, last))
    }

    /// Returns page numbers for a compact page selector.
    ///
    /// `None` marks an elided gap. Edges keep `edge` pages at each end and the
    /// current page keeps `around` neighbours on each side.
    ///
    /// ```rust
    /// use folio::types::PaginationMeta;
    ///
    /// let meta = PaginationMeta::new(10, 10, 200);
    /// let window = meta.page_window(1, 1);
    /// assert_eq!(
    ///     window,
    ///     vec![Some(1), None, Some(9), Some(10), Some(11), None, Some(20)]
    /// );
    /// ```
    pub fn page_window(&self, edge: u64, around: u64) -> Vec<Option<u64>> {
        let last = self.total_pages;
        if last == 0 {
            return Vec::new();
        }
        let current = u64::from(self.page).min(last);

        let mut pages = Vec::new();

        let left_end = (1 + edge).min(last + 1);
        pages.extend((1..left_end).map(Some));

        let mid_start = left_end.max(current.saturating_sub(around));
        let mid_end = mid_start.max((current + around + 1).min(last + 1));
        if mid_start > left_end {
            pages.push(None);
        }
        pages.extend((mid_start..mid_end).map(Some));

        let right_start = mid_end.max(last.saturating_sub(edge) + 1);
        if right_start > mid_end {
            pages.push(None);
        }
        pages.extend((right_start..=last).map(Some));

        pages
    }
}
