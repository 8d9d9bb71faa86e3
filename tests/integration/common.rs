//! Shared harness: a mock back-office API and fixtures.

use std::sync::Once;
use std::time::Duration;

use folio::{Client, ListingConfig};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Bearer token every test client sends.
pub const TOKEN: &str = "integration-token";

static TRACING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A mock API server plus a client pointed at it.
pub struct TestApi {
    pub server: MockServer,
    pub client: Client,
}

impl TestApi {
    /// Starts a server with a short search throttle so tests stay fast.
    pub async fn start() -> Self {
        Self::start_with(
            ListingConfig::builder()
                .search_throttle(Duration::from_millis(100))
                .build(),
        )
        .await
    }

    pub async fn start_with(config: ListingConfig) -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let client = Client::builder()
            .url(server.uri())
            .bearer_token(TOKEN)
            .insecure()
            .listing_config(config)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        Self { server, client }
    }

    /// Serves `body` for every `GET /{resource}`.
    pub async fn mount_list(&self, resource: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", resource)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far for `GET /{resource}`.
    pub async fn list_requests(&self, resource: &str) -> Vec<Request> {
        let wanted = format!("/{}", resource);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "GET" && r.url.path() == wanted)
            .collect()
    }
}

/// Value of query parameter `key` in `request`, if present.
pub fn query_value(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// A list envelope with client-consistent pagination.
pub fn list_body(items: Vec<Value>, stats: Value, page: u32, page_size: u32, total: u64) -> Value {
    let total_pages = total.div_ceil(u64::from(page_size));
    json!({
        "success": true,
        "data": { "items": items, "stats": stats },
        "metadata": { "pagination": {
            "page": page,
            "pageSize": page_size,
            "totalItems": total,
            "totalPages": total_pages,
            "hasNextPage": u64::from(page) < total_pages,
            "hasPreviousPage": page > 1
        }}
    })
}

pub fn message_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "subject": "Hello",
        "message": "Loved the portfolio",
        "status": status,
        "createdAt": "2026-03-01T09:30:00Z"
    })
}

pub fn subscriber_json(id: &str, email: &str, status: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": null,
        "status": status,
        "source": "footer",
        "subscribedAt": "2026-01-15T12:00:00Z",
        "unsubscribedAt": null
    })
}

/// Polls `check` until it holds or two seconds pass.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
