//! Resource client behaviour over HTTP.

use folio::entities::{Message, NewsletterDraft, NewsletterStatus};
use folio::export::{ExportFormat, export};
use folio::types::{EntityId, ListParams};
use folio::{Client, ErrorKind};
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TestApi, init_tracing, list_body, message_json};

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let api = TestApi::start().await;
    api.mount_list("messages", list_body(vec![], json!({}), 1, 10, 0))
        .await;

    api.client
        .messages()
        .list(&ListParams::new().with("page", 1).with("pageSize", 10))
        .await
        .unwrap();

    let requests = api.list_requests("messages").await;
    let agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(agent.starts_with("folio-rust/"));
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/messages/m1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": message_json("m1", "Jane", "unread")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .url(format!("{}/api/v1", server.uri()))
        .bearer_token("t")
        .insecure()
        .build()
        .unwrap();

    let message = client.messages().get(&EntityId::from("m1")).await.unwrap();
    assert_eq!(message.name, "Jane");
}

#[tokio::test]
async fn test_invalid_params_fail_before_any_request() {
    let api = TestApi::start().await;

    let err = api
        .client
        .messages()
        .list(&ListParams::new().with("page", 0).with("pageSize", 10))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(api.server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_unauthorized_maps_status() {
    let api = TestApi::start().await;
    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Session expired"
        })))
        .mount(&api.server)
        .await;

    let err = api
        .client
        .subscribers()
        .list(&ListParams::new().with("page", 1).with("pageSize", 10))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.message(), "Session expired");
}

#[tokio::test]
async fn test_success_false_on_200_is_an_error() {
    let api = TestApi::start().await;
    api.mount_list("feature-requests", json!({ "success": false }))
        .await;

    let err = api
        .client
        .feature_requests()
        .list(&ListParams::new().with("page", 1).with("pageSize", 10))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Failed to fetch feature requests");
}

#[tokio::test]
async fn test_create_newsletter() {
    let api = TestApi::start().await;
    Mock::given(method("POST"))
        .and(path("/newsletters"))
        .and(body_json(json!({ "subject": "October", "content": "News" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "id": "n1",
                "subject": "October",
                "content": "News",
                "status": "draft",
                "createdAt": "2026-10-01T08:00:00Z"
            }
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let created = api
        .client
        .newsletters()
        .create(&NewsletterDraft {
            subject: "October".into(),
            content: "News".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id.as_str(), "n1");
    assert_eq!(created.status, NewsletterStatus::Draft);
}

#[tokio::test]
async fn test_export_fetched_page() {
    let api = TestApi::start().await;
    api.mount_list(
        "messages",
        list_body(
            vec![
                message_json("m1", "Jane", "unread"),
                message_json("m2", "Omar", "read"),
            ],
            json!({}),
            1,
            10,
            2,
        ),
    )
    .await;

    let page = api
        .client
        .messages()
        .list(&ListParams::new().with("page", 1).with("pageSize", 10))
        .await
        .unwrap();
    let csv = export::<Message>(&page.items, ExportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,name,email,subject,message,status,createdAt");
    assert!(lines[1].starts_with("m1,Jane,jane@example.com,"));
    assert!(lines[2].contains(",read,"));
}
