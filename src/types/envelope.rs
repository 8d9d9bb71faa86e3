//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

use super::{EntityId, PaginationMeta};
use crate::Error;

/// The `{success, data, metadata, message, error}` wrapper returned by every
/// endpoint of the back-office API.
///
/// A response is only usable when `success` is `true`; otherwise `error`
/// (or `message`) explains why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the backend considers the call successful. Missing counts as
    /// failure.
    #[serde(default)]
    pub success: bool,
    /// Payload, present on success.
    pub data: Option<T>,
    /// List metadata, present on list responses.
    pub metadata: Option<ListMetadata>,
    /// Optional informational message.
    pub message: Option<String>,
    /// Error details, present on failure.
    pub error: Option<ApiError>,
}

impl<T> Envelope<T> {
    /// Wraps `data` in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            metadata: None,
            message: None,
            error: None,
        }
    }

    /// Builds a failed envelope carrying `message`.
    pub fn failure(code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            metadata: None,
            message: None,
            error: Some(ApiError {
                code: code.map(str::to_string),
                message: Some(message.into()),
            }),
        }
    }

    /// Returns the backend-provided error message and code, if any.
    pub fn error_details(&self) -> (Option<String>, Option<String>) {
        let message = self
            .error
            .as_ref()
            .and_then(|e| e.message.clone())
            .or_else(|| self.message.clone())
            .filter(|m| !m.trim().is_empty());
        let code = self.error.as_ref().and_then(|e| e.code.clone());
        (message, code)
    }

    /// Converts an unsuccessful envelope into an [`Error`], using `fallback`
    /// when the backend gave no message.
    fn failure_error(&self, fallback: &str) -> Error {
        let (message, code) = self.error_details();
        let err = Error::backend(message.unwrap_or_else(|| fallback.to_string()));
        match code {
            Some(code) => err.with_code(code),
            None => err,
        }
    }

    /// Extracts `data`, failing if `success` is false or data is missing.
    pub fn into_data(self, fallback: &str) -> Result<T, Error> {
        if !self.success {
            return Err(self.failure_error(fallback));
        }
        self.data
            .ok_or_else(|| Error::invalid_response("response is missing `data`"))
    }
}

impl<T, S> Envelope<ListData<T, S>> {
    /// Extracts items, stats and pagination from a list envelope.
    ///
    /// Pagination is normalized so that its derived fields always agree with
    /// `totalItems` and `pageSize`.
    pub fn into_list_page(self, fallback: &str) -> Result<ListPage<T, S>, Error> {
        if !self.success {
            return Err(self.failure_error(fallback));
        }
        let pagination = self
            .metadata
            .and_then(|m| m.pagination)
            .ok_or_else(|| Error::invalid_response("response is missing `metadata.pagination`"))?
            .normalized()?;
        let data = self
            .data
            .ok_or_else(|| Error::invalid_response("response is missing `data`"))?;

        Ok(ListPage {
            items: data.items,
            stats: data.stats,
            pagination,
        })
    }
}

/// Error details inside an [`Envelope`].
///
/// Accepts both `{"code": "...", "message": "..."}` and a bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: Option<String>,
    /// Human-readable error message.
    pub message: Option<String>,
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Detailed {
                #[serde(default)]
                code: Option<String>,
                #[serde(default)]
                message: Option<String>,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(message) => ApiError {
                code: None,
                message: Some(message),
            },
            Raw::Detailed { code, message } => ApiError { code, message },
        })
    }
}

/// `metadata` block of a list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMetadata {
    /// Page counters.
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

/// `data` block of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, S: Deserialize<'de> + Default"))]
pub struct ListData<T, S> {
    /// Records on the current page, in backend order.
    pub items: Vec<T>,
    /// Aggregate counters; absent stats decode as the default.
    #[serde(default)]
    pub stats: S,
}

/// `data` block of a delete response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedData {
    /// Identifier of the deleted record.
    pub id: EntityId,
}

/// A normalized list result: one page of items plus stats and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T, S> {
    /// Records on the current page.
    pub items: Vec<T>,
    /// Aggregate counters for the whole (filtered) collection.
    pub stats: S,
    /// Page counters.
    pub pagination: PaginationMeta,
}

impl<T, S> ListPage<T, S> {
    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
