//! Listing controller bound to a filter store, over HTTP.

use std::sync::Arc;
use std::time::Duration;

use folio::entities::{Message, MessageStats, Subscriber};
use folio::filters::FilterStore;
use folio::listing::{ListingController, ListingStatus};
use folio::testing::MemoryLocation;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestApi, eventually, list_body, message_json, query_value, subscriber_json};

fn bound_messages(
    api: &TestApi,
    location: &Arc<MemoryLocation>,
) -> (FilterStore, ListingController<Message>) {
    let store = FilterStore::for_entity::<Message>(
        location.clone(),
        api.client.listing_config().clone(),
    );
    let controller = ListingController::new(Arc::new(api.client.messages()));
    controller.bind(&store);
    (store, controller)
}

#[tokio::test]
async fn test_initial_load_uses_url_state() {
    let api = TestApi::start().await;
    api.mount_list(
        "messages",
        list_body(
            vec![message_json("m1", "Jane", "unread")],
            json!({ "total": 1, "unread": 1, "read": 0, "archived": 0 }),
            2,
            5,
            6,
        ),
    )
    .await;

    let location = Arc::new(MemoryLocation::new("status=unread&page=2&pageSize=5"));
    let (_store, controller) = bound_messages(&api, &location);

    assert!(eventually(|| controller.status().is_ready()).await);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].name, "Jane");
    assert_eq!(
        snapshot.stats,
        MessageStats {
            total: 1,
            unread: 1,
            read: 0,
            archived: 0
        }
    );

    let requests = api.list_requests("messages").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "status").as_deref(), Some("unread"));
    assert_eq!(query_value(&requests[0], "page").as_deref(), Some("2"));
    assert_eq!(query_value(&requests[0], "pageSize").as_deref(), Some("5"));
    assert_eq!(query_value(&requests[0], "sortBy").as_deref(), Some("createdAt"));
    assert_eq!(query_value(&requests[0], "sortOrder").as_deref(), Some("desc"));
    assert_eq!(
        requests[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer integration-token")
    );
}

#[tokio::test]
async fn test_search_commits_after_pause() {
    let api = TestApi::start().await;
    api.mount_list(
        "messages",
        list_body(vec![], json!({}), 1, 10, 0),
    )
    .await;

    let location = Arc::new(MemoryLocation::new("page=3"));
    let (store, controller) = bound_messages(&api, &location);
    assert!(eventually(|| controller.status().is_ready()).await);

    for partial in ["j", "ja", "jan", "jane"] {
        store.set_search(partial);
    }
    assert!(store.has_pending_search());
    assert_eq!(location.query(), "page=3");

    assert!(eventually(|| location.query() == "q=jane").await);
    assert!(
        eventually(|| {
            let snapshot = controller.snapshot();
            snapshot.status.is_ready()
                && snapshot
                    .params
                    .as_ref()
                    .is_some_and(|p| p.get("search") == Some("jane"))
        })
        .await
    );

    // Intermediate keystrokes never reach the API.
    let searches: Vec<_> = api
        .list_requests("messages")
        .await
        .iter()
        .filter_map(|r| query_value(r, "search"))
        .collect();
    assert_eq!(searches, vec!["jane".to_string()]);

    let last = api.list_requests("messages").await;
    let last = last.last().unwrap();
    assert_eq!(query_value(last, "page").as_deref(), Some("1"));
}

#[tokio::test]
async fn test_server_error_shows_fallback_message() {
    let api = TestApi::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api.server)
        .await;

    let location = Arc::new(MemoryLocation::new(""));
    let (_store, controller) = bound_messages(&api, &location);

    assert!(eventually(|| !controller.status().is_loading()).await);
    assert_eq!(
        controller.status(),
        ListingStatus::Error("Failed to fetch messages".into())
    );
    assert!(controller.snapshot().items.is_empty());
}

#[tokio::test]
async fn test_backend_error_message_wins_over_fallback() {
    let api = TestApi::start().await;
    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "success": false,
            "error": { "code": "MAINTENANCE", "message": "Back in five minutes" }
        })))
        .mount(&api.server)
        .await;

    let controller = ListingController::new(Arc::new(api.client.subscribers()));
    let status = controller
        .load(
            folio::types::ListParams::new()
                .with("page", 1)
                .with("pageSize", 10),
        )
        .await;
    assert_eq!(status, ListingStatus::Error("Back in five minutes".into()));
}

#[tokio::test]
async fn test_pagination_is_recomputed_from_totals() {
    let api = TestApi::start().await;
    api.mount_list(
        "subscribers",
        json!({
            "success": true,
            "data": {
                "items": [subscriber_json("s1", "a@example.com", "active")],
                "stats": { "total": 21, "active": 20, "unsubscribed": 1 }
            },
            "metadata": { "pagination": {
                "page": 3, "pageSize": 10, "totalItems": 21,
                "totalPages": 7, "hasNextPage": true, "hasPreviousPage": false
            }}
        }),
    )
    .await;

    let location = Arc::new(MemoryLocation::new("page=3"));
    let store = FilterStore::for_entity::<Subscriber>(
        location.clone(),
        api.client.listing_config().clone(),
    );
    let controller = ListingController::new(Arc::new(api.client.subscribers()));
    controller.bind(&store);
    assert!(eventually(|| controller.status().is_ready()).await);

    let pagination = controller.snapshot().pagination.unwrap();
    assert_eq!(pagination.total_pages, 3);
    assert!(!pagination.has_next_page);
    assert!(pagination.has_previous_page);
}

#[tokio::test]
async fn test_unchanged_filters_do_not_refetch() {
    let api = TestApi::start().await;
    api.mount_list("messages", list_body(vec![], json!({}), 1, 10, 0))
        .await;

    let location = Arc::new(MemoryLocation::new(""));
    let (store, controller) = bound_messages(&api, &location);
    assert!(eventually(|| controller.status().is_ready()).await);

    // Selecting page 1 again commits the same state.
    store.set_page(1);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(api.list_requests("messages").await.len(), 1);

    store.set_status(Some("archived")).unwrap();
    assert!(
        eventually(|| controller
            .snapshot()
            .params
            .is_some_and(|p| p.get("status") == Some("archived")))
        .await
    );
    assert!(eventually(|| controller.status().is_ready()).await);
    assert_eq!(api.list_requests("messages").await.len(), 2);
}

#[tokio::test]
async fn test_slow_response_is_superseded() {
    let api = TestApi::start().await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("status", "read"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_body(
                    vec![message_json("old", "Stale", "read")],
                    json!({}),
                    1,
                    10,
                    1,
                ))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("status", "archived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
            vec![message_json("new", "Fresh", "archived")],
            json!({}),
            1,
            10,
            1,
        )))
        .mount(&api.server)
        .await;
    api.mount_list("messages", list_body(vec![], json!({}), 1, 10, 0))
        .await;

    let location = Arc::new(MemoryLocation::new(""));
    let (store, controller) = bound_messages(&api, &location);
    assert!(eventually(|| controller.status().is_ready()).await);

    store.set_status(Some("read")).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.set_status(Some("archived")).unwrap();

    assert!(
        eventually(|| {
            let snapshot = controller.snapshot();
            snapshot.status.is_ready() && snapshot.items.iter().any(|m| m.id.as_str() == "new")
        })
        .await
    );

    // The slow response lands after the fast one and must be dropped.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let ids: Vec<_> = controller
        .snapshot()
        .items
        .iter()
        .map(|m| m.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["new".to_string()]);
}
