//! Per-row mutations.

use std::sync::Arc;

use crate::client::ResourceClient;
use crate::entities::{Entity, EntityStatus};
use crate::error::Result;
use crate::listing::Refresh;
use crate::notify::{Notifier, Toast};
use crate::types::EntityId;

/// Status changes and deletes triggered from a row's action menu.
///
/// Each action is one request against the single-item endpoint. On success it
/// raises a success toast and refreshes the listing once; on failure it raises
/// an error toast and leaves the listing alone. Rows are never patched in
/// place.
pub struct RowActions<E: Entity> {
    client: ResourceClient<E>,
    notifier: Arc<dyn Notifier>,
    refresh: Arc<dyn Refresh>,
}

impl<E: Entity> Clone for RowActions<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            notifier: Arc::clone(&self.notifier),
            refresh: Arc::clone(&self.refresh),
        }
    }
}

impl<E: Entity> std::fmt::Debug for RowActions<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowActions")
            .field("resource", &E::RESOURCE)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> RowActions<E> {
    /// Creates row actions that refresh through `refresh`.
    pub fn new(
        client: ResourceClient<E>,
        notifier: Arc<dyn Notifier>,
        refresh: Arc<dyn Refresh>,
    ) -> Self {
        Self {
            client,
            notifier,
            refresh,
        }
    }

    /// Sends `PATCH /{resource}/{id}` with `{"status": ...}`.
    pub async fn change_status(&self, id: &EntityId, status: E::Status) -> Result<E> {
        match self.client.set_status(id, status).await {
            Ok(updated) => {
                tracing::info!(
                    resource = E::RESOURCE,
                    id = %id,
                    status = status.as_str(),
                    "row status changed"
                );
                self.notifier.notify(Toast::success(format!(
                    "{} status updated successfully",
                    E::LABEL
                )));
                self.refresh.refresh().await;
                Ok(updated)
            }
            Err(err) => {
                self.notifier.notify(Toast::error(err.message()));
                Err(err)
            }
        }
    }

    /// Sends `DELETE /{resource}/{id}`.
    pub async fn delete(&self, id: &EntityId) -> Result<EntityId> {
        match self.client.delete(id).await {
            Ok(deleted) => {
                self.notifier
                    .notify(Toast::success(format!("{} deleted successfully", E::LABEL)));
                self.refresh.refresh().await;
                Ok(deleted)
            }
            Err(err) => {
                self.notifier.notify(Toast::error(err.message()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::{Message, Subscriber, SubscriberStatus};
    use crate::listing::{ListingController, ListingStatus};
    use crate::notify::ToastKind;
    use crate::testing::{CountingRefresh, RecordingNotifier};
    use crate::transport::{Method, MockBackend};
    use crate::types::ListParams;

    fn backend() -> Arc<MockBackend> {
        let backend = Arc::new(MockBackend::new());
        backend.insert_raw(
            "subscribers",
            json!({
                "id": "s1", "email": "jane@example.com", "status": "active",
                "subscribedAt": "2024-03-01T10:00:00Z"
            }),
        );
        backend
    }

    #[tokio::test]
    async fn test_change_status_toasts_and_refreshes_once() {
        let backend = backend();
        let notifier = Arc::new(RecordingNotifier::new());
        let refresh = Arc::new(CountingRefresh::new());
        let actions = RowActions::new(
            ResourceClient::<Subscriber>::new(backend.clone()),
            notifier.clone(),
            refresh.clone(),
        );

        let updated = actions
            .change_status(&EntityId::from("s1"), SubscriberStatus::Unsubscribed)
            .await
            .unwrap();
        assert_eq!(updated.status, SubscriberStatus::Unsubscribed);
        assert_eq!(refresh.count(), 1);
        assert_eq!(
            notifier.messages(),
            vec!["Subscriber status updated successfully".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_toasts_error_without_refresh() {
        let backend = backend();
        backend.fail_next_with(409, "Subscriber has pending sends");
        let notifier = Arc::new(RecordingNotifier::new());
        let refresh = Arc::new(CountingRefresh::new());
        let actions = RowActions::new(
            ResourceClient::<Subscriber>::new(backend.clone()),
            notifier.clone(),
            refresh.clone(),
        );

        let err = actions.delete(&EntityId::from("s1")).await.unwrap_err();
        assert_eq!(err.message(), "Subscriber has pending sends");
        assert_eq!(refresh.count(), 0);
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(backend.records("subscribers").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_refreshes_listing() {
        let backend = Arc::new(MockBackend::new());
        for id in ["m1", "m2"] {
            backend.insert_raw(
                "messages",
                json!({
                    "id": id, "name": "Jane", "email": "jane@example.com",
                    "message": "Hi", "status": "unread", "createdAt": "2024-03-01T10:00:00Z"
                }),
            );
        }
        let client = ResourceClient::<Message>::new(backend.clone());
        let controller = ListingController::new(Arc::new(client.clone()));
        controller
            .load(ListParams::new().with("page", 1).with("pageSize", 10))
            .await;

        let actions = RowActions::new(
            client,
            Arc::new(RecordingNotifier::new()),
            Arc::new(controller.clone()),
        );
        actions.delete(&EntityId::from("m1")).await.unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.status, ListingStatus::Ready);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(backend.requests_with(Method::Get).len(), 2);
        assert_eq!(backend.requests_with(Method::Delete).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_shows_previous_rows_while_loading() {
        let backend = backend();
        backend.insert_raw(
            "subscribers",
            json!({
                "id": "s2", "email": "omar@example.com", "status": "active",
                "subscribedAt": "2024-03-02T10:00:00Z"
            }),
        );
        let client = ResourceClient::<Subscriber>::new(backend.clone());
        let controller = ListingController::new(Arc::new(client.clone()));
        controller
            .load(ListParams::new().with("page", 1).with("pageSize", 10))
            .await;

        let actions = RowActions::new(
            client,
            Arc::new(RecordingNotifier::new()),
            Arc::new(controller.clone()),
        );
        let mut updates = controller.subscribe();
        updates.borrow_and_update();

        // The patch answers at once, the refresh list takes 50ms.
        backend.push_latency(std::time::Duration::ZERO);
        backend.push_latency(std::time::Duration::from_millis(50));

        let observe = async {
            updates.changed().await.unwrap();
            let loading = updates.borrow_and_update().clone();
            updates.changed().await.unwrap();
            let ready = updates.borrow_and_update().clone();
            (loading, ready)
        };
        let s1 = EntityId::from("s1");
        let (result, (loading, ready)) = tokio::join!(
            actions.change_status(&s1, SubscriberStatus::Unsubscribed),
            observe
        );
        result.unwrap();

        assert_eq!(loading.status, ListingStatus::Loading);
        let rows: Vec<_> = loading
            .items
            .iter()
            .map(|s| (s.id.as_str().to_string(), s.status))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("s1".to_string(), SubscriberStatus::Active),
                ("s2".to_string(), SubscriberStatus::Active),
            ]
        );

        assert_eq!(ready.status, ListingStatus::Ready);
        assert_eq!(ready.generation, 2);
        assert_eq!(ready.items[0].status, SubscriberStatus::Unsubscribed);
    }
}
