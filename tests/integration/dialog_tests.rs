//! Delete and edit dialogs driving real requests.

use std::sync::Arc;

use folio::ListingConfig;
use folio::dialogs::{DeleteDialog, DialogPhase, EditDialog};
use folio::entities::{Message, Subscriber, SubscriberPatch};
use folio::listing::ListingController;
use folio::testing::{CountingRefresh, RecordingNotifier};
use folio::types::{EntityId, ListParams};
use folio::{Error, ErrorKind};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestApi, list_body, message_json, subscriber_json};

fn first_page() -> ListParams {
    ListParams::new().with("page", 1).with("pageSize", 10)
}

#[tokio::test]
async fn test_typed_confirmation_deletes_and_refreshes() {
    let api = TestApi::start().await;
    api.mount_list(
        "messages",
        list_body(vec![message_json("m1", "Jane", "read")], json!({}), 1, 10, 1),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/messages/m1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "id": "m1" } })),
        )
        .expect(1)
        .mount(&api.server)
        .await;

    let controller = Arc::new(ListingController::new(Arc::new(api.client.messages())));
    assert!(controller.load(first_page()).await.is_ready());

    let notifier = Arc::new(RecordingNotifier::new());
    let dialog = DeleteDialog::new(
        api.client.messages(),
        api.client.listing_config().clone(),
        notifier.clone(),
        controller.clone(),
    );

    dialog.open(EntityId::from("m1"));
    dialog.set_confirmation("Delet");
    assert!(!dialog.can_submit());
    dialog.set_confirmation("Delete");
    assert!(dialog.can_submit());

    let deleted = dialog.submit().await.unwrap();
    assert_eq!(deleted.as_str(), "m1");
    assert_eq!(dialog.phase(), DialogPhase::Closed);
    assert_eq!(
        notifier.messages(),
        vec!["Message deleted successfully".to_string()]
    );
    assert_eq!(api.list_requests("messages").await.len(), 2);
    assert_eq!(controller.snapshot().generation, 2);
}

#[tokio::test]
async fn test_unconfirmed_delete_sends_nothing() {
    let api = TestApi::start().await;
    let refresh = Arc::new(CountingRefresh::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let dialog = DeleteDialog::<Message>::new(
        api.client.messages(),
        ListingConfig::default(),
        notifier.clone(),
        refresh.clone(),
    );

    dialog.open(EntityId::from("m1"));
    dialog.set_confirmation("remove");
    let err = dialog.submit().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(dialog.phase(), DialogPhase::Open);

    assert!(api.server.received_requests().await.unwrap_or_default().is_empty());
    assert!(notifier.toasts().is_empty());
    assert_eq!(refresh.count(), 0);
}

#[tokio::test]
async fn test_failed_delete_keeps_dialog_open() {
    let api = TestApi::start().await;
    Mock::given(method("DELETE"))
        .and(path("/messages/m1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "code": "NOT_FOUND", "message": "Message not found" }
        })))
        .mount(&api.server)
        .await;

    let refresh = Arc::new(CountingRefresh::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let dialog = DeleteDialog::<Message>::new(
        api.client.messages(),
        ListingConfig::default(),
        notifier.clone(),
        refresh.clone(),
    );

    dialog.open(EntityId::from("m1"));
    dialog.set_confirmation("delete");
    let err: Error = dialog.submit().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), Some("NOT_FOUND"));

    assert_eq!(dialog.phase(), DialogPhase::Open);
    assert_eq!(dialog.error().as_deref(), Some("Message not found"));
    assert_eq!(notifier.messages(), vec!["Message not found".to_string()]);
    assert_eq!(refresh.count(), 0);
}

#[tokio::test]
async fn test_edit_dialog_patches_only_changed_fields() {
    let api = TestApi::start().await;
    Mock::given(method("PATCH"))
        .and(path("/subscribers/s1"))
        .and(body_json(json!({ "name": "Jane Doe" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "s1",
                "email": "jane@example.com",
                "name": "Jane Doe",
                "status": "active",
                "subscribedAt": "2026-01-15T12:00:00Z"
            }
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let refresh = Arc::new(CountingRefresh::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let dialog: EditDialog<Subscriber, SubscriberPatch> =
        EditDialog::new(api.client.subscribers(), notifier.clone(), refresh.clone());

    dialog.open(EntityId::from("s1"), SubscriberPatch::default());
    dialog.update_draft(|draft| draft.name = Some("Jane Doe".into()));
    let updated = dialog.submit().await.unwrap();

    assert_eq!(updated.name.as_deref(), Some("Jane Doe"));
    assert_eq!(dialog.phase(), DialogPhase::Closed);
    assert_eq!(
        notifier.messages(),
        vec!["Subscriber updated successfully".to_string()]
    );
    assert_eq!(refresh.count(), 1);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_backend() {
    let api = TestApi::start().await;
    api.mount_list(
        "subscribers",
        list_body(
            vec![subscriber_json("s1", "jane@example.com", "active")],
            json!({}),
            1,
            10,
            1,
        ),
    )
    .await;

    let refresh = Arc::new(CountingRefresh::new());
    let dialog: EditDialog<Subscriber, SubscriberPatch> = EditDialog::new(
        api.client.subscribers(),
        Arc::new(RecordingNotifier::new()),
        refresh.clone(),
    );

    dialog.open(
        EntityId::from("s1"),
        SubscriberPatch {
            email: Some("not-an-email".into()),
            ..SubscriberPatch::default()
        },
    );
    let err = dialog.submit().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(dialog.phase(), DialogPhase::Open);
    assert!(dialog.error().is_some());

    let patches = api
        .server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "PATCH")
        .count();
    assert_eq!(patches, 0);
    assert_eq!(refresh.count(), 0);
}
