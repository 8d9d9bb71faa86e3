//! Flat query-parameter map sent to list endpoints.

use std::collections::BTreeMap;
use std::fmt;

use crate::Error;

/// Query parameters for a list request.
///
/// A flat, ordered map of string keys to string values. `page` and `pageSize`
/// are required by every list endpoint; everything else passes through to the
/// backend untouched. Two maps are equal when they hold the same pairs, which
/// is what the listing controller uses to decide whether to refetch.
///
/// ```rust
/// use folio::types::ListParams;
///
/// let params = ListParams::new()
///     .with("page", "2")
///     .with("pageSize", "10")
///     .with_opt("search", Some("jane"));
/// assert_eq!(params.page(), Some(2));
/// assert_eq!(params.to_query_string(), "page=2&pageSize=10&search=jane");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams(BTreeMap<String, String>);

impl ListParams {
    /// Key of the 1-based page number.
    pub const PAGE: &'static str = "page";
    /// Key of the page size.
    pub const PAGE_SIZE: &'static str = "pageSize";

    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter only when `value` is present.
    #[must_use]
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Inserts a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Returns the raw value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if the parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the parsed page number.
    pub fn page(&self) -> Option<u32> {
        self.get(Self::PAGE).and_then(|v| v.parse().ok())
    }

    /// Returns the parsed page size.
    pub fn page_size(&self) -> Option<u32> {
        self.get(Self::PAGE_SIZE).and_then(|v| v.parse().ok())
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that `page` and `pageSize` are present and positive.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error naming the
    /// offending parameter.
    pub fn validate(&self) -> Result<(), Error> {
        for key in [Self::PAGE, Self::PAGE_SIZE] {
            match self.get(key) {
                None => {
                    return Err(Error::validation(format!(
                        "missing required parameter `{}`",
                        key
                    )));
                }
                Some(raw) => match raw.parse::<u32>() {
                    Ok(n) if n > 0 => {}
                    _ => {
                        return Err(Error::validation(format!(
                            "parameter `{}` must be a positive integer, got `{}`",
                            key, raw
                        )));
                    }
                },
            }
        }
        Ok(())
    }

    /// Fills in keys from `defaults` that are not already set.
    #[must_use]
    pub fn merge_defaults(mut self, defaults: &ListParams) -> Self {
        for (key, value) in &defaults.0 {
            self.0
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl fmt::Display for ListParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for ListParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ListParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
