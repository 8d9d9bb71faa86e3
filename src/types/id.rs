//! Entity identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a backend-owned record.
///
/// Identifiers are assigned by the backend and never change. The client only
/// ever echoes them back in single-item paths (`/{resource}/{id}`).
///
/// Backends in the wild return either strings or integers, so both decode.
///
/// ```rust
/// use folio::types::EntityId;
///
/// let a: EntityId = serde_json::from_str("\"sub_1\"").unwrap();
/// let b: EntityId = serde_json::from_str("42").unwrap();
/// assert_eq!(a.as_str(), "sub_1");
/// assert_eq!(b.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EntityId(s),
            Raw::Number(n) => EntityId(n.to_string()),
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
