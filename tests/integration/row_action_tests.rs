//! Row actions against the API, refreshing a live listing.

use std::sync::Arc;

use folio::entities::{Subscriber, SubscriberStatus};
use folio::listing::ListingController;
use folio::notify::ToastKind;
use folio::table::RowActions;
use folio::testing::RecordingNotifier;
use folio::types::{EntityId, ListParams};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TOKEN, TestApi, list_body, subscriber_json};

fn first_page() -> ListParams {
    ListParams::new().with("page", 1).with("pageSize", 10)
}

#[tokio::test]
async fn test_unsubscribe_patches_status_and_refreshes() {
    let api = TestApi::start().await;
    api.mount_list(
        "subscribers",
        list_body(
            vec![subscriber_json("s1", "jane@example.com", "active")],
            json!({ "total": 1, "active": 1, "unsubscribed": 0 }),
            1,
            10,
            1,
        ),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path("/subscribers/s1"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({ "status": "unsubscribed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": subscriber_json("s1", "jane@example.com", "unsubscribed")
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let controller: Arc<ListingController<Subscriber>> =
        Arc::new(ListingController::new(Arc::new(api.client.subscribers())));
    assert!(controller.load(first_page()).await.is_ready());

    let notifier = Arc::new(RecordingNotifier::new());
    let actions = RowActions::new(api.client.subscribers(), notifier.clone(), controller.clone());

    let updated = actions
        .change_status(&EntityId::from("s1"), SubscriberStatus::Unsubscribed)
        .await
        .unwrap();
    assert_eq!(updated.status, SubscriberStatus::Unsubscribed);

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].message, "Subscriber status updated successfully");

    // One initial list plus exactly one refresh.
    assert_eq!(api.list_requests("subscribers").await.len(), 2);
    assert!(controller.status().is_ready());
}

#[tokio::test]
async fn test_failed_status_change_toasts_and_skips_refresh() {
    let api = TestApi::start().await;
    api.mount_list("subscribers", list_body(vec![], json!({}), 1, 10, 0))
        .await;
    Mock::given(method("PATCH"))
        .and(path("/subscribers/s1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api.server)
        .await;

    let controller: Arc<ListingController<Subscriber>> =
        Arc::new(ListingController::new(Arc::new(api.client.subscribers())));
    assert!(controller.load(first_page()).await.is_ready());

    let notifier = Arc::new(RecordingNotifier::new());
    let actions = RowActions::new(api.client.subscribers(), notifier.clone(), controller.clone());

    let result = actions
        .change_status(&EntityId::from("s1"), SubscriberStatus::Unsubscribed)
        .await;
    assert!(result.is_err());

    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(api.list_requests("subscribers").await.len(), 1);
}
