//! Backend trait definitions and common types.

use serde_json::Value;

use crate::Error;
use crate::types::{EntityId, ListParams};

/// HTTP method of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// A raw response: HTTP status plus the decoded JSON body.
///
/// Bodies that are not JSON arrive as [`Value::String`], empty bodies as
/// [`Value::Null`]. Interpreting the envelope is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Value,
}

impl BackendResponse {
    /// A `200 OK` response.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// A response with an explicit status.
    pub fn with_status(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The back-office API, one method per endpoint shape.
///
/// Implementations perform exactly one request per call and never retry.
/// `Err` is reserved for requests that produced no response at all
/// (connection refused, timeout); HTTP error statuses come back as
/// `Ok(BackendResponse)` with the status set.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `GET /{resource}?{params}`
    async fn list(&self, resource: &str, params: &ListParams) -> Result<BackendResponse, Error>;

    /// `GET /{resource}/{id}`
    async fn get(&self, resource: &str, id: &EntityId) -> Result<BackendResponse, Error>;

    /// `PATCH /{resource}/{id}` with a partial JSON body.
    async fn patch(
        &self,
        resource: &str,
        id: &EntityId,
        body: Value,
    ) -> Result<BackendResponse, Error>;

    /// `POST /{resource}`
    async fn create(&self, resource: &str, body: Value) -> Result<BackendResponse, Error>;

    /// `DELETE /{resource}/{id}`
    async fn delete(&self, resource: &str, id: &EntityId) -> Result<BackendResponse, Error>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
