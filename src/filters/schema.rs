//! Per-listing description of the accepted filter dimensions.

use crate::types::SortOrder;

/// Page size used when neither the listing nor the configuration names one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Which filter values a listing accepts and what its defaults are.
///
/// Values outside the schema decode to their defaults when read from a URL
/// and are rejected with a validation error when set programmatically.
///
/// ```rust
/// use folio::filters::FilterSchema;
/// use folio::types::SortOrder;
///
/// let schema = FilterSchema::builder()
///     .statuses(vec!["active", "unsubscribed"])
///     .default_sort_by("subscribedAt")
///     .build();
///
/// assert_eq!(schema.default_sort_order, SortOrder::Descending);
/// assert_eq!(schema.canonical_status("ACTIVE"), Some("active"));
/// assert!(schema.allows_sort_by("anything"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct FilterSchema {
    /// Column sorted on when the URL names none.
    #[builder(default = String::from("createdAt"), into)]
    pub default_sort_by: String,

    /// Direction used when the URL names none.
    #[builder(default)]
    pub default_sort_order: SortOrder,

    /// Page size for this listing; falls back to the configured default.
    pub default_page_size: Option<u32>,

    /// Accepted status wire values. Empty means status filtering is off.
    #[builder(default)]
    pub statuses: Vec<&'static str>,

    /// Accepted categories. Empty means category filtering is off.
    #[builder(default)]
    pub categories: Vec<&'static str>,

    /// Sortable columns. Empty accepts any column.
    #[builder(default)]
    pub sortable: Vec<&'static str>,
}

impl Default for FilterSchema {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FilterSchema {
    /// Effective default page size.
    pub fn page_size(&self) -> u32 {
        self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Returns the canonical spelling of `raw` if it is an accepted status.
    pub fn canonical_status(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.statuses
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(raw))
    }

    /// Returns the canonical spelling of `raw` if it is an accepted category.
    pub fn canonical_category(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.categories
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(raw))
    }

    /// Returns `true` if `category` is accepted.
    pub fn allows_category(&self, category: &str) -> bool {
        self.canonical_category(category).is_some()
    }

    /// Returns `true` if the listing can be sorted on `column`.
    pub fn allows_sort_by(&self, column: &str) -> bool {
        !column.is_empty() && (self.sortable.is_empty() || self.sortable.contains(&column))
    }
}
