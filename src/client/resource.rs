//! Typed access to one resource's endpoints.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::entities::{Entity, EntityStatus};
use crate::error::{Error, ErrorKind, Result};
use crate::transport::{Backend, BackendResponse};
use crate::types::{DeletedData, EntityId, Envelope, ListData, ListPage, ListParams};

/// Typed client for the endpoints of entity `E`.
///
/// Every call is a single request. Failures carry the backend's message when
/// it sent one, otherwise a fallback such as `"Failed to fetch messages"`.
///
/// ## Example
///
/// ```rust
/// # tokio_test::block_on(async {
/// use std::sync::Arc;
/// use folio::prelude::*;
/// use folio::testing::MockBackend;
///
/// let backend = Arc::new(MockBackend::new());
/// let client = Client::with_backend(backend.clone());
///
/// let params = ListParams::new().with("page", 1).with("pageSize", 10);
/// let page = client.messages().list(&params).await.unwrap();
/// assert!(page.is_empty());
/// assert_eq!(page.pagination.total_pages, 0);
/// # });
/// ```
pub struct ResourceClient<E> {
    backend: Arc<dyn Backend>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceClient<E> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for ResourceClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &E::RESOURCE)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl<E: Entity> ResourceClient<E> {
    /// Creates a client over `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            _entity: PhantomData,
        }
    }

    /// Fetches one page.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Validation`] if `page` or `pageSize` is missing, before
    ///   any request is made
    /// - the status-mapped kind or [`ErrorKind::Backend`] if the backend
    ///   rejected the call
    /// - [`ErrorKind::InvalidResponse`] if the body is not a list envelope
    pub async fn list(&self, params: &ListParams) -> Result<ListPage<E, E::Stats>> {
        params.validate()?;
        let fallback = format!("Failed to fetch {}", E::RESOURCE.replace('-', " "));

        tracing::debug!(resource = E::RESOURCE, params = %params, "fetching list");
        let response = self.backend.list(E::RESOURCE, params).await;
        let envelope: Envelope<ListData<E, E::Stats>> =
            self.decode(response, &fallback, "list")?;
        let page = envelope.into_list_page(&fallback).inspect_err(|e| {
            tracing::warn!(resource = E::RESOURCE, error = %e, "list rejected");
        })?;

        tracing::debug!(
            resource = E::RESOURCE,
            items = page.len(),
            total_items = page.pagination.total_items,
            "list fetched"
        );
        Ok(page)
    }

    /// Fetches one record.
    pub async fn get(&self, id: &EntityId) -> Result<E> {
        let fallback = self.fallback("fetch");
        let response = self.backend.get(E::RESOURCE, id).await;
        let envelope: Envelope<E> = self.decode(response, &fallback, "get")?;
        envelope.into_data(&fallback)
    }

    /// Applies a partial update after validating it client-side.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Validation`] without making a request if `patch`
    /// fails validation.
    pub async fn patch<P>(&self, id: &EntityId, patch: &P) -> Result<E>
    where
        P: Serialize + Validate + Sync,
    {
        patch.validate()?;
        let body = serde_json::to_value(patch)
            .map_err(|e| Error::internal(format!("cannot encode patch: {}", e)).with_source(e))?;
        self.patch_json(id, body).await
    }

    /// Changes only the status, sending `{"status": "..."}`.
    pub async fn set_status(&self, id: &EntityId, status: E::Status) -> Result<E> {
        self.patch_json(id, serde_json::json!({ "status": status.as_str() }))
            .await
    }

    async fn patch_json(&self, id: &EntityId, body: Value) -> Result<E> {
        let fallback = self.fallback("update");
        tracing::debug!(resource = E::RESOURCE, id = %id, "patching");
        let response = self.backend.patch(E::RESOURCE, id, body).await;
        let envelope: Envelope<E> = self.decode(response, &fallback, "patch")?;
        let updated = envelope.into_data(&fallback)?;
        tracing::info!(resource = E::RESOURCE, id = %id, "record updated");
        Ok(updated)
    }

    /// Deletes one record, returning the id the backend confirmed.
    pub async fn delete(&self, id: &EntityId) -> Result<EntityId> {
        let fallback = self.fallback("delete");
        tracing::debug!(resource = E::RESOURCE, id = %id, "deleting");
        let response = self.backend.delete(E::RESOURCE, id).await;
        let envelope: Envelope<DeletedData> = self.decode(response, &fallback, "delete")?;
        // Some deployments answer `data: null` on delete.
        let deleted = match envelope.data {
            None if envelope.success => id.clone(),
            _ => envelope.into_data(&fallback)?.id,
        };
        tracing::info!(resource = E::RESOURCE, id = %deleted, "record deleted");
        Ok(deleted)
    }

    /// Creates a record after validating the draft client-side.
    pub async fn create<D>(&self, draft: &D) -> Result<E>
    where
        D: Serialize + Validate + Sync,
    {
        draft.validate()?;
        let fallback = self.fallback("create");
        let body = serde_json::to_value(draft)
            .map_err(|e| Error::internal(format!("cannot encode draft: {}", e)).with_source(e))?;
        let response = self.backend.create(E::RESOURCE, body).await;
        let envelope: Envelope<E> = self.decode(response, &fallback, "create")?;
        let created = envelope.into_data(&fallback)?;
        tracing::info!(resource = E::RESOURCE, id = %created.id(), "record created");
        Ok(created)
    }

    fn fallback(&self, verb: &str) -> String {
        format!("Failed to {} {}", verb, E::LABEL.to_lowercase())
    }

    /// Maps transport failures and error statuses, then parses the envelope.
    fn decode<T: DeserializeOwned>(
        &self,
        response: Result<BackendResponse>,
        fallback: &str,
        operation: &'static str,
    ) -> Result<Envelope<T>> {
        let response = response.inspect_err(|e| {
            tracing::warn!(resource = E::RESOURCE, operation, error = %e, "request failed");
        })?;

        if !response.is_success() {
            let err = status_error(&response, fallback);
            tracing::warn!(
                resource = E::RESOURCE,
                operation,
                status = response.status,
                error = %err,
                "request rejected"
            );
            return Err(err);
        }

        serde_json::from_value(response.body).map_err(|e| {
            tracing::warn!(resource = E::RESOURCE, operation, error = %e, "malformed response");
            Error::invalid_response(format!("malformed {} response: {}", operation, e))
                .with_source(e)
        })
    }
}

/// Builds the error for a non-2xx response, preferring the envelope message.
fn status_error(response: &BackendResponse, fallback: &str) -> Error {
    let kind = ErrorKind::from_http_status(response.status);
    let (message, code) = serde_json::from_value::<Envelope<Value>>(response.body.clone())
        .map(|envelope| envelope.error_details())
        .unwrap_or((None, None));

    let err = Error::new(kind, message.unwrap_or_else(|| fallback.to_string()));
    match code {
        Some(code) => err.with_code(code),
        None => err,
    }
}
