//! In-memory backend for testing.
//!
//! Behaves like the back-office API: filters, sorts and paginates list calls,
//! computes per-status stats, applies patches and deletes, and wraps every
//! answer in the standard envelope.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value, json};

use super::traits::{Backend, BackendResponse, Method};
use crate::Error;
use crate::entities::Entity;
use crate::types::{EntityId, ListParams, PaginationMeta};

/// A request observed by [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, e.g. `/messages/m1`.
    pub path: String,
    /// Query parameters (list calls only).
    pub params: ListParams,
    /// JSON body (patch and create only).
    pub body: Option<Value>,
}

enum Canned {
    Failure(Error),
    Response(BackendResponse),
}

/// Mock backend for testing.
///
/// Records are stored as JSON per resource. Failures and latencies are queued
/// and consumed one request at a time, in request order.
pub struct MockBackend {
    records: RwLock<HashMap<String, Vec<Value>>>,
    requests: RwLock<Vec<RecordedRequest>>,
    request_count: AtomicU64,
    next_id: AtomicU64,
    canned: Mutex<VecDeque<Canned>>,
    latencies: Mutex<VecDeque<Duration>>,
}

impl MockBackend {
    /// Creates an empty mock backend.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            requests: RwLock::new(Vec::new()),
            request_count: AtomicU64::new(0),
            next_id: AtomicU64::new(1),
            canned: Mutex::new(VecDeque::new()),
            latencies: Mutex::new(VecDeque::new()),
        }
    }

    /// Stores `items` under the entity's resource.
    pub fn seed<E: Entity>(&self, items: impl IntoIterator<Item = E>) -> Result<(), Error> {
        let values = items
            .into_iter()
            .map(|item| serde_json::to_value(&item))
            .collect::<Result<Vec<_>, _>>()?;
        self.records
            .write()
            .entry(E::RESOURCE.to_string())
            .or_default()
            .extend(values);
        Ok(())
    }

    /// Stores a raw JSON record under `resource`.
    pub fn insert_raw(&self, resource: &str, record: Value) {
        self.records
            .write()
            .entry(resource.to_string())
            .or_default()
            .push(record);
    }

    /// Returns the stored records of `resource`.
    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.records
            .read()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Fails the next request without a response, as a network error would.
    pub fn set_failure(&self, error: Error) {
        self.canned.lock().push_back(Canned::Failure(error));
    }

    /// Answers the next request with `response` instead of the stored data.
    pub fn respond_next_with(&self, response: BackendResponse) {
        self.canned.lock().push_back(Canned::Response(response));
    }

    /// Answers the next request with an error envelope.
    pub fn fail_next_with(&self, status: u16, message: &str) {
        self.respond_next_with(BackendResponse::with_status(
            status,
            json!({ "success": false, "error": { "message": message } }),
        ));
    }

    /// Delays the next request by `latency`.
    pub fn push_latency(&self, latency: Duration) {
        self.latencies.lock().push_back(latency);
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns every request made, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().clone()
    }

    /// Returns requests made with `method`.
    pub fn requests_with(&self, method: Method) -> Vec<RecordedRequest> {
        self.requests
            .read()
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().last().cloned()
    }

    /// Forgets recorded requests.
    pub fn clear_requests(&self) {
        self.requests.write().clear();
    }

    /// Records the request and waits out any queued latency.
    ///
    /// Returns the canned outcome assigned to this request, if any.
    async fn begin(&self, request: RecordedRequest) -> Option<Canned> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(request);

        let canned = self.canned.lock().pop_front();
        let latency = self.latencies.lock().pop_front();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        canned
    }

    fn list_records(&self, resource: &str, params: &ListParams) -> BackendResponse {
        let (Some(page), Some(page_size)) = (params.page(), params.page_size()) else {
            return error_response(400, "VALIDATION_ERROR", "page and pageSize are required");
        };
        if page == 0 || page_size == 0 {
            return error_response(400, "VALIDATION_ERROR", "page and pageSize must be positive");
        }

        let search = params.get("search").map(str::to_lowercase);
        let categories: Option<Vec<&str>> = params
            .get("categories")
            .map(|c| c.split(',').filter(|c| !c.is_empty()).collect());

        // Stats count every status, so they ignore the status filter.
        let scoped: Vec<Value> = self
            .records(resource)
            .into_iter()
            .filter(|r| search.as_deref().is_none_or(|q| matches_search(r, q)))
            .filter(|r| {
                categories.as_ref().is_none_or(|cats| {
                    r.get("category")
                        .and_then(Value::as_str)
                        .is_some_and(|c| cats.contains(&c))
                })
            })
            .collect();
        let stats = status_stats(&scoped);

        let mut items: Vec<Value> = match params.get("status") {
            Some(status) => scoped
                .into_iter()
                .filter(|r| r.get("status").and_then(Value::as_str) == Some(status))
                .collect(),
            None => scoped,
        };

        if let Some(sort_by) = params.get("sortBy") {
            let descending = params.get("sortOrder") != Some("asc");
            items.sort_by(|a, b| {
                let ord = compare_fields(a.get(sort_by), b.get(sort_by));
                if descending { ord.reverse() } else { ord }
            });
        }

        let pagination = PaginationMeta::new(page, page_size, items.len() as u64);
        let start = (u64::from(page - 1) * u64::from(page_size)) as usize;
        let page_items: Vec<Value> = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        BackendResponse::ok(json!({
            "success": true,
            "data": { "items": page_items, "stats": stats },
            "metadata": { "pagination": pagination },
        }))
    }

    fn get_record(&self, resource: &str, id: &EntityId) -> BackendResponse {
        match self
            .records(resource)
            .into_iter()
            .find(|r| record_id(r).as_deref() == Some(id.as_str()))
        {
            Some(record) => BackendResponse::ok(json!({ "success": true, "data": record })),
            None => not_found(),
        }
    }

    fn patch_record(&self, resource: &str, id: &EntityId, body: Value) -> BackendResponse {
        let Value::Object(changes) = body else {
            return error_response(400, "VALIDATION_ERROR", "body must be an object");
        };

        let mut records = self.records.write();
        let Some(record) = records
            .get_mut(resource)
            .and_then(|rs| rs.iter_mut().find(|r| record_id(r).as_deref() == Some(id.as_str())))
        else {
            return not_found();
        };

        if let Value::Object(fields) = record {
            for (key, value) in changes {
                fields.insert(key, value);
            }
        }

        BackendResponse::ok(json!({
            "success": true,
            "data": record.clone(),
            "message": "Updated successfully",
        }))
    }

    fn create_record(&self, resource: &str, body: Value) -> BackendResponse {
        let Value::Object(mut fields) = body else {
            return error_response(400, "VALIDATION_ERROR", "body must be an object");
        };

        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        fields
            .entry("id")
            .or_insert_with(|| Value::String(format!("{}-{}", resource, n)));
        fields
            .entry("createdAt")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
        fields
            .entry("status")
            .or_insert_with(|| Value::String("draft".to_string()));

        let record = Value::Object(fields);
        self.insert_raw(resource, record.clone());

        BackendResponse::with_status(201, json!({ "success": true, "data": record }))
    }

    fn delete_record(&self, resource: &str, id: &EntityId) -> BackendResponse {
        let mut records = self.records.write();
        let Some(rs) = records.get_mut(resource) else {
            return not_found();
        };
        let before = rs.len();
        rs.retain(|r| record_id(r).as_deref() != Some(id.as_str()));
        if rs.len() == before {
            return not_found();
        }

        BackendResponse::ok(json!({
            "success": true,
            "data": { "id": id },
            "message": "Deleted successfully",
        }))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("request_count", &self.request_count())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Backend for MockBackend {
    async fn list(&self, resource: &str, params: &ListParams) -> Result<BackendResponse, Error> {
        let request = RecordedRequest {
            method: Method::Get,
            path: format!("/{}", resource),
            params: params.clone(),
            body: None,
        };
        match self.begin(request).await {
            Some(canned) => canned.into_result(),
            None => Ok(self.list_records(resource, params)),
        }
    }

    async fn get(&self, resource: &str, id: &EntityId) -> Result<BackendResponse, Error> {
        let request = RecordedRequest {
            method: Method::Get,
            path: format!("/{}/{}", resource, id),
            params: ListParams::new(),
            body: None,
        };
        match self.begin(request).await {
            Some(canned) => canned.into_result(),
            None => Ok(self.get_record(resource, id)),
        }
    }

    async fn patch(
        &self,
        resource: &str,
        id: &EntityId,
        body: Value,
    ) -> Result<BackendResponse, Error> {
        let request = RecordedRequest {
            method: Method::Patch,
            path: format!("/{}/{}", resource, id),
            params: ListParams::new(),
            body: Some(body.clone()),
        };
        match self.begin(request).await {
            Some(canned) => canned.into_result(),
            None => Ok(self.patch_record(resource, id, body)),
        }
    }

    async fn create(&self, resource: &str, body: Value) -> Result<BackendResponse, Error> {
        let request = RecordedRequest {
            method: Method::Post,
            path: format!("/{}", resource),
            params: ListParams::new(),
            body: Some(body.clone()),
        };
        match self.begin(request).await {
            Some(canned) => canned.into_result(),
            None => Ok(self.create_record(resource, body)),
        }
    }

    async fn delete(&self, resource: &str, id: &EntityId) -> Result<BackendResponse, Error> {
        let request = RecordedRequest {
            method: Method::Delete,
            path: format!("/{}/{}", resource, id),
            params: ListParams::new(),
            body: None,
        };
        match self.begin(request).await {
            Some(canned) => canned.into_result(),
            None => Ok(self.delete_record(resource, id)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

impl Canned {
    fn into_result(self) -> Result<BackendResponse, Error> {
        match self {
            Canned::Failure(error) => Err(error),
            Canned::Response(response) => Ok(response),
        }
    }
}

fn error_response(status: u16, code: &str, message: &str) -> BackendResponse {
    BackendResponse::with_status(
        status,
        json!({ "success": false, "error": { "code": code, "message": message } }),
    )
}

fn not_found() -> BackendResponse {
    error_response(404, "NOT_FOUND", "Record not found")
}

fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn matches_search(record: &Value, query: &str) -> bool {
    let Value::Object(fields) = record else {
        return false;
    };
    fields.values().any(|v| {
        v.as_str()
            .is_some_and(|s| s.to_lowercase().contains(query))
    })
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Null) | None, Some(Value::Null) | None) => CmpOrdering::Equal,
        (Some(Value::Null) | None, _) => CmpOrdering::Less,
        (_, Some(Value::Null) | None) => CmpOrdering::Greater,
        _ => CmpOrdering::Equal,
    }
}

/// `{"total": n, "<status>": n, ...}` with status keys in camelCase.
fn status_stats(records: &[Value]) -> Value {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for status in records.iter().filter_map(|r| r.get("status").and_then(Value::as_str)) {
        *counts.entry(camel_case(status)).or_default() += 1;
    }

    let mut stats = Map::new();
    stats.insert("total".to_string(), json!(records.len()));
    for (status, count) in counts {
        stats.insert(status, json!(count));
    }
    Value::Object(stats)
}

fn camel_case(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper = false;
    for c in kebab.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn backend_with_messages() -> MockBackend {
        let backend = MockBackend::new();
        for (id, name, status) in [
            ("m1", "Jane", "unread"),
            ("m2", "John", "read"),
            ("m3", "Janet", "unread"),
            ("m4", "Bob", "archived"),
        ] {
            backend.insert_raw(
                "messages",
                json!({ "id": id, "name": name, "status": status }),
            );
        }
        backend
    }

    fn page(page: u32, size: u32) -> ListParams {
        ListParams::new().with("page", page).with("pageSize", size)
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let backend = backend_with_messages();
        let params = page(1, 1).with("search", "jan").with("status", "unread");
        let response = backend.list("messages", &params).await.unwrap();

        let body = response.body;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["metadata"]["pagination"]["totalItems"], 2);
        assert_eq!(body["metadata"]["pagination"]["totalPages"], 2);
        assert_eq!(body["metadata"]["pagination"]["hasNextPage"], true);
        assert_eq!(body["data"]["stats"]["total"], 2);
        assert_eq!(body["data"]["stats"]["unread"], 2);
    }

    #[tokio::test]
    async fn test_list_sorts() {
        let backend = backend_with_messages();
        let params = page(1, 10).with("sortBy", "name").with("sortOrder", "asc");
        let response = backend.list("messages", &params).await.unwrap();
        let names: Vec<&str> = response.body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|i| i["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Bob", "Jane", "Janet", "John"]);
    }

    #[tokio::test]
    async fn test_list_requires_page_params() {
        let backend = backend_with_messages();
        let response = backend.list("messages", &ListParams::new()).await.unwrap();
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let backend = backend_with_messages();
        let id = EntityId::from("m1");

        let response = backend
            .patch("messages", &id, json!({ "status": "archived" }))
            .await
            .unwrap();
        assert_eq!(response.body["data"]["status"], "archived");

        let response = backend.delete("messages", &id).await.unwrap();
        assert!(response.is_success());
        assert_eq!(backend.records("messages").len(), 3);

        let response = backend.delete("messages", &id).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let backend = MockBackend::new();
        let response = backend
            .create("newsletters", json!({ "subject": "June", "content": "Hi" }))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body["data"]["id"], "newsletters-1");
        assert_eq!(response.body["data"]["status"], "draft");
    }

    #[tokio::test]
    async fn test_canned_outcomes_are_one_shot() {
        let backend = backend_with_messages();
        backend.set_failure(Error::connection("refused"));
        backend.fail_next_with(500, "Database unavailable");

        let err = backend.list("messages", &page(1, 10)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);

        let response = backend.list("messages", &page(1, 10)).await.unwrap();
        assert_eq!(response.status, 500);

        let response = backend.list("messages", &page(1, 10)).await.unwrap();
        assert!(response.is_success());
        assert_eq!(backend.request_count(), 3);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let backend = backend_with_messages();
        backend
            .patch("messages", &EntityId::from("m2"), json!({ "status": "read" }))
            .await
            .unwrap();
        let last = backend.last_request().unwrap();
        assert_eq!(last.method, Method::Patch);
        assert_eq!(last.path, "/messages/m2");
        assert_eq!(last.body, Some(json!({ "status": "read" })));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("in-progress"), "inProgress");
        assert_eq!(camel_case("unread"), "unread");
    }
}
