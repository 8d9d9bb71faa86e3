//! Listing behaviour configuration.

use std::time::Duration;

/// Tunables shared by the filter store, listing controller and dialogs.
///
/// ## Example
///
/// ```rust
/// use folio::ListingConfig;
/// use std::time::Duration;
///
/// // Snappier search for small datasets
/// let config = ListingConfig::builder()
///     .search_throttle(Duration::from_millis(300))
///     .default_page_size(25)
///     .build();
///
/// assert_eq!(config.delete_confirmation, "delete");
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ListingConfig {
    /// How long search input must pause before it is committed to the URL.
    #[builder(default = Duration::from_secs(1))]
    pub search_throttle: Duration,

    /// Page size used when neither the URL nor the entity names one.
    #[builder(default = 10)]
    pub default_page_size: u32,

    /// Literal the user must type to enable a destructive delete.
    ///
    /// Compared case-insensitively after trimming whitespace.
    #[builder(default = String::from("delete"), into)]
    pub delete_confirmation: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ListingConfig {
    /// Returns `true` if `input` matches the delete confirmation literal.
    pub fn confirms_delete(&self, input: &str) -> bool {
        input
            .trim()
            .eq_ignore_ascii_case(self.delete_confirmation.trim())
    }
}
