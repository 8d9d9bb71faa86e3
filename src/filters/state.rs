//! Typed filter state and its URL query-string codec.

use std::collections::BTreeSet;

use url::form_urlencoded;

use super::FilterSchema;
use crate::types::{ListParams, SortOrder};

/// URL parameter names.
mod keys {
    pub const SEARCH: &str = "q";
    pub const STATUS: &str = "status";
    pub const CATEGORIES: &str = "categories";
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "pageSize";
    pub const SORT_BY: &str = "sortBy";
    pub const SORT_ORDER: &str = "sortOrder";
}

/// The filter, page and sort selection of one listing.
///
/// `page` is always at least 1 and `page_size` always positive.
///
/// ```rust
/// use folio::filters::{FilterSchema, FilterState};
///
/// let schema = FilterSchema::builder().statuses(vec!["unread", "read"]).build();
/// let state = FilterState::from_query("?q=jane&status=READ&page=3", &schema);
///
/// assert_eq!(state.search, "jane");
/// assert_eq!(state.status.as_deref(), Some("read"));
/// assert_eq!(state.page, 3);
/// assert_eq!(state.to_query(&schema), "q=jane&status=read&page=3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search. Empty means no search.
    pub search: String,
    /// Status wire value, if filtering by status.
    pub status: Option<String>,
    /// Selected categories.
    pub categories: BTreeSet<String>,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Column to sort on.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl FilterState {
    /// The state a listing starts in when the URL carries no parameters.
    pub fn defaults(schema: &FilterSchema) -> Self {
        Self {
            search: String::new(),
            status: None,
            categories: BTreeSet::new(),
            page: 1,
            page_size: schema.page_size(),
            sort_by: schema.default_sort_by.clone(),
            sort_order: schema.default_sort_order,
        }
    }

    /// Returns `true` if every dimension is at its default.
    pub fn is_default(&self, schema: &FilterSchema) -> bool {
        *self == Self::defaults(schema)
    }

    /// Returns `true` if a search, status or category filter is active.
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some() || !self.categories.is_empty()
    }

    /// Encodes the state as a query string, omitting defaults.
    ///
    /// The result has no leading `?` and is empty for the default state.
    pub fn to_query(&self, schema: &FilterSchema) -> String {
        let defaults = Self::defaults(schema);
        let mut query = form_urlencoded::Serializer::new(String::new());

        if !self.search.is_empty() {
            query.append_pair(keys::SEARCH, &self.search);
        }
        if let Some(status) = &self.status {
            query.append_pair(keys::STATUS, status);
        }
        if !self.categories.is_empty() {
            query.append_pair(keys::CATEGORIES, &self.joined_categories());
        }
        if self.page != defaults.page {
            query.append_pair(keys::PAGE, &self.page.to_string());
        }
        if self.page_size != defaults.page_size {
            query.append_pair(keys::PAGE_SIZE, &self.page_size.to_string());
        }
        if self.sort_by != defaults.sort_by {
            query.append_pair(keys::SORT_BY, &self.sort_by);
        }
        if self.sort_order != defaults.sort_order {
            query.append_pair(keys::SORT_ORDER, self.sort_order.as_str());
        }

        query.finish()
    }

    /// Decodes a query string, with or without a leading `?`.
    ///
    /// Unknown keys are ignored. Malformed or disallowed values decode to the
    /// default for their dimension.
    pub fn from_query(query: &str, schema: &FilterSchema) -> Self {
        let mut state = Self::defaults(schema);
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                keys::SEARCH => state.search = value.into_owned(),
                keys::STATUS => {
                    state.status = schema.canonical_status(&value).map(str::to_string);
                }
                keys::CATEGORIES => {
                    state.categories = value
                        .split(',')
                        .filter_map(|c| schema.canonical_category(c))
                        .map(str::to_string)
                        .collect();
                }
                keys::PAGE => {
                    state.page = positive(&value).unwrap_or(1);
                }
                keys::PAGE_SIZE => {
                    state.page_size = positive(&value).unwrap_or_else(|| schema.page_size());
                }
                keys::SORT_BY => {
                    if schema.allows_sort_by(&value) {
                        state.sort_by = value.into_owned();
                    }
                }
                keys::SORT_ORDER => {
                    state.sort_order = value.parse().unwrap_or(schema.default_sort_order);
                }
                _ => {}
            }
        }

        state
    }

    /// Derives the parameter map sent to the list endpoint.
    ///
    /// `page`, `pageSize`, `sortBy` and `sortOrder` are always present; search,
    /// status and categories only when set.
    pub fn to_list_params(&self) -> ListParams {
        let search = self.search.trim();
        ListParams::new()
            .with(ListParams::PAGE, self.page)
            .with(ListParams::PAGE_SIZE, self.page_size)
            .with_opt("search", (!search.is_empty()).then_some(search))
            .with_opt("status", self.status.as_deref())
            .with_opt(
                "categories",
                (!self.categories.is_empty()).then(|| self.joined_categories()),
            )
            .with("sortBy", &self.sort_by)
            .with("sortOrder", self.sort_order)
    }

    fn joined_categories(&self) -> String {
        self.categories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn schema() -> FilterSchema {
        FilterSchema::builder()
            .statuses(vec!["pending", "in-progress", "completed"])
            .categories(vec!["ui", "performance", "other"])
            .sortable(vec!["title", "createdAt", "votes"])
            .build()
    }

    #[test]
    fn test_default_state_encodes_empty() {
        let schema = schema();
        assert_eq!(FilterState::defaults(&schema).to_query(&schema), "");
    }

    #[test]
    fn test_search_only() {
        let schema = schema();
        let state = FilterState {
            search: "jane".into(),
            ..FilterState::defaults(&schema)
        };
        assert_eq!(state.to_query(&schema), "q=jane");
    }

    #[test]
    fn test_full_round_trip() {
        let schema = schema();
        let state = FilterState {
            search: "dark mode & more".into(),
            status: Some("in-progress".into()),
            categories: ["ui", "other"].iter().map(|s| s.to_string()).collect(),
            page: 4,
            page_size: 25,
            sort_by: "votes".into(),
            sort_order: SortOrder::Ascending,
        };
        let query = state.to_query(&schema);
        assert_eq!(
            query,
            "q=dark+mode+%26+more&status=in-progress&categories=other%2Cui&page=4&pageSize=25&sortBy=votes&sortOrder=asc"
        );
        assert_eq!(FilterState::from_query(&query, &schema), state);
    }

    #[test_case("page=abc" ; "non numeric page")]
    #[test_case("page=0" ; "zero page")]
    #[test_case("page=-2" ; "negative page")]
    #[test_case("status=bogus" ; "unknown status")]
    #[test_case("sortOrder=sideways" ; "unknown sort order")]
    #[test_case("sortBy=password" ; "unsortable column")]
    #[test_case("pageSize=0" ; "zero page size")]
    #[test_case("categories=billing" ; "unknown category")]
    #[test_case("utm_source=mail" ; "unknown key")]
    fn test_malformed_values_decode_to_defaults(query: &str) {
        let schema = schema();
        assert!(FilterState::from_query(query, &schema).is_default(&schema));
    }

    #[test]
    fn test_to_list_params() {
        let schema = schema();
        let state = FilterState {
            search: "  jane ".into(),
            status: Some("pending".into()),
            ..FilterState::defaults(&schema)
        };
        let params = state.to_list_params();
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("pageSize"), Some("10"));
        assert_eq!(params.get("search"), Some("jane"));
        assert_eq!(params.get("status"), Some("pending"));
        assert_eq!(params.get("sortBy"), Some("createdAt"));
        assert_eq!(params.get("sortOrder"), Some("desc"));
        assert!(!params.contains("categories"));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_blank_search_not_sent() {
        let schema = schema();
        let state = FilterState {
            search: "   ".into(),
            ..FilterState::defaults(&schema)
        };
        assert!(!state.to_list_params().contains("search"));
        assert!(!state.has_active_filters());
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        (
            ".{0,12}",
            prop::option::of(prop::sample::select(vec!["pending", "in-progress", "completed"])),
            prop::sample::subsequence(vec!["ui", "performance", "other"], 0..=3),
            1u32..1000,
            1u32..200,
            prop::sample::select(vec!["title", "createdAt", "votes"]),
            any::<bool>(),
        )
            .prop_map(|(search, status, categories, page, page_size, sort_by, asc)| FilterState {
                search,
                status: status.map(str::to_string),
                categories: categories.into_iter().map(str::to_string).collect(),
                page,
                page_size,
                sort_by: sort_by.to_string(),
                sort_order: if asc { SortOrder::Ascending } else { SortOrder::Descending },
            })
    }

    proptest! {
        #[test]
        fn prop_query_round_trip(state in arb_state()) {
            let schema = schema();
            let decoded = FilterState::from_query(&state.to_query(&schema), &schema);
            prop_assert_eq!(decoded, state);
        }

        #[test]
        fn prop_decoded_page_is_positive(raw in ".{0,20}") {
            let schema = schema();
            let state = FilterState::from_query(&raw, &schema);
            prop_assert!(state.page >= 1);
            prop_assert!(state.page_size >= 1);
        }
    }
}
