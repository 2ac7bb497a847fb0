//! Shared test fixture: an in-process HTTP server that mimics the
//! paperless-ngx REST API closely enough to exercise the tool layer.
//!
//! The fixture records the last query string and request body it saw and
//! counts every request, so tests can assert on exactly what went over the
//! wire.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Token the fixture expects on every request.
pub const FIXTURE_TOKEN: &str = "fixture-token";

#[derive(Clone, Default)]
pub struct FixtureState {
    pub hits: Arc<AtomicUsize>,
    pub last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
    pub last_body: Arc<Mutex<Option<Value>>>,
}

impl FixtureState {
    fn record(&self, query: Option<HashMap<String, String>>, body: Option<Value>) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if let Some(q) = query {
            *self.last_query.lock().unwrap() = Some(q);
        }
        if let Some(b) = body {
            *self.last_body.lock().unwrap() = Some(b);
        }
    }
}

/// A running fixture server.
pub struct PaperlessFixture {
    pub base_url: String,
    pub state: FixtureState,
}

impl PaperlessFixture {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.state.last_query.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().unwrap().clone()
    }
}

/// Start the fixture on an ephemeral port.
pub async fn spawn_fixture() -> PaperlessFixture {
    let state = FixtureState::default();

    let app = Router::new()
        .route("/api/tags/", get(list_tags).post(create_tag))
        .route(
            "/api/tags/{id}/",
            get(get_tag).patch(update_tag).delete(delete_tag),
        )
        .route("/api/documents/", get(list_documents))
        .route("/api/documents/{id}/", get(get_document))
        .route("/api/documents/{id}/similar/", get(similar_documents))
        .route("/api/documents/bulk_edit/", post(bulk_edit))
        .route(
            "/api/correspondents/{id}/",
            axum::routing::patch(update_correspondent),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture serve");
    });

    PaperlessFixture {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Token {FIXTURE_TOKEN}"))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid token." })),
    )
}

fn tag(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "slug": name,
        "name": name,
        "color": "#ff0000",
        "match": "",
        "matching_algorithm": 1,
        "is_insensitive": true,
        "is_inbox_tag": false,
        "document_count": 3
    })
}

fn document(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "correspondent": 1,
        "document_type": 2,
        "storage_path": null,
        "content": "Total amount due: 42.00 EUR",
        "tags": [1, 2],
        "created": "2024-01-15T10:00:00Z",
        "created_date": "2024-01-15",
        "modified": "2024-01-16T08:30:00Z",
        "added": "2024-01-15T10:05:00Z",
        "archive_serial_number": null,
        "original_file_name": "invoice.pdf",
        "archived_file_name": "0000001.pdf"
    })
}

async fn list_tags(
    State(state): State<FixtureState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(Some(query), None);
    Json(json!({
        "count": 60,
        "next": "http://paperless/api/tags/?page=2",
        "previous": null,
        "results": [tag(1, "inbox"), tag(2, "archive")]
    }))
    .into_response()
}

async fn get_tag(
    State(state): State<FixtureState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(None, None);
    if id == 404 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "No Tag matches the given query." })),
        )
            .into_response();
    }
    Json(tag(id, "inbox")).into_response()
}

async fn create_tag(
    State(state): State<FixtureState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    let name = body["name"].as_str().unwrap_or("unnamed").to_string();
    state.record(None, Some(body.clone()));
    let mut created = tag(42, &name);
    if let Some(color) = body.get("color") {
        created["color"] = color.clone();
    }
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_tag(
    State(state): State<FixtureState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(None, Some(body.clone()));
    let mut updated = tag(id, "inbox");
    if let Some(obj) = body.as_object() {
        for (key, value) in obj {
            updated[key] = value.clone();
        }
    }
    Json(updated).into_response()
}

async fn delete_tag(
    State(state): State<FixtureState>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(None, None);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_documents(
    State(state): State<FixtureState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(Some(query), None);
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [document(7, "Invoice 2024-01")]
    }))
    .into_response()
}

async fn get_document(
    State(state): State<FixtureState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(None, None);
    Json(document(id, "Invoice 2024-01")).into_response()
}

async fn similar_documents(
    State(state): State<FixtureState>,
    Path(_id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(Some(query), None);
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [document(8, "Invoice 2024-02")]
    }))
    .into_response()
}

async fn bulk_edit(
    State(state): State<FixtureState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(None, Some(body));
    Json(json!({ "result": "OK" })).into_response()
}

async fn update_correspondent(
    State(state): State<FixtureState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    state.record(None, Some(body.clone()));
    let mut updated = json!({
        "id": id,
        "slug": "acme",
        "name": "ACME",
        "match": "",
        "matching_algorithm": 1,
        "is_insensitive": true,
        "document_count": 12,
        "last_correspondence": "2024-02-01"
    });
    if let Some(obj) = body.as_object() {
        for (key, value) in obj {
            updated[key] = value.clone();
        }
    }
    Json(updated).into_response()
}
