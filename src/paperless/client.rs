//! Authenticated HTTP client for the paperless-ngx REST API.
//!
//! The client is stateless apart from its connection pool and is safe to
//! share across concurrent tool calls. Every method performs exactly one
//! HTTP round trip (bounded by [`DEFAULT_TIMEOUT`]) and returns either a
//! decoded value or an [`ApiError`] carrying the HTTP status.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::error::{ApiError, ApiResult};
use super::types::{Correspondent, CustomField, Document, DocumentType, Page, StoragePath, Tag};

/// Client-side timeout applied to every outbound request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Maximum page size accepted by list endpoints.
pub const MAX_PAGE_SIZE: u32 = 100;

const DOCUMENTS: &str = "/api/documents/";
const CORRESPONDENTS: &str = "/api/correspondents/";
const DOCUMENT_TYPES: &str = "/api/document_types/";
const TAGS: &str = "/api/tags/";
const STORAGE_PATHS: &str = "/api/storage_paths/";
const CUSTOM_FIELDS: &str = "/api/custom_fields/";

/// A batched mutation applied to several documents in one call.
///
/// Optional fields are omitted from the outgoing body entirely when unset;
/// the backing API owns the atomicity (or lack thereof) of the batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkEditRequest {
    pub documents: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_tags: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_tags: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_correspondent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_document_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_storage_path: Option<i64>,
}

/// Paperless-ngx API client.
#[derive(Debug, Clone)]
pub struct PaperlessClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl PaperlessClient {
    /// Create a new client for the given instance and API token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Base URL of the paperless instance (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "paperless API request");
        self.http
            .request(method, url)
            .timeout(DEFAULT_TIMEOUT)
            .header("Authorization", format!("Token {}", self.token))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let resp = self.request(Method::GET, path).query(query).send().await?;
        Self::handle_response(resp, path).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(resp, path).await
    }

    async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.request(Method::PATCH, path).json(body).send().await?;
        Self::handle_response(resp, path).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let resp = self.request(Method::DELETE, path).send().await?;
        let status = resp.status();
        // DELETE may answer 204 No Content or 200 OK
        if status != StatusCode::NO_CONTENT && status != StatusCode::OK {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &body));
        }
        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        path: &str,
    ) -> ApiResult<T> {
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(parse_error(status.as_u16(), &body));
        }
        serde_json::from_slice(&body).map_err(|e| {
            error!(path, error = %e, "failed to parse paperless response");
            ApiError::Decode(format!("{path}: {e}"))
        })
    }

    // ========================================================================
    // Generic per-resource helpers
    // ========================================================================

    async fn list_resource<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<T>> {
        let query = [
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        self.get_json(endpoint, &query).await
    }

    async fn get_resource<T: DeserializeOwned>(&self, endpoint: &str, id: i64) -> ApiResult<T> {
        self.get_json(&format!("{endpoint}{id}/"), &[]).await
    }

    async fn create_resource<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
    ) -> ApiResult<T> {
        self.post_json(endpoint, payload).await
    }

    async fn update_resource<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        id: i64,
        fields: &Map<String, Value>,
    ) -> ApiResult<T> {
        self.patch_json(&format!("{endpoint}{id}/"), fields).await
    }

    async fn delete_resource(&self, endpoint: &str, id: i64) -> ApiResult<()> {
        self.delete(&format!("{endpoint}{id}/")).await
    }

    // ========================================================================
    // Documents
    // ========================================================================

    pub async fn list_documents(&self, page: u32, page_size: u32) -> ApiResult<Page<Document>> {
        self.list_resource(DOCUMENTS, page, page_size).await
    }

    pub async fn get_document(&self, id: i64) -> ApiResult<Document> {
        self.get_resource(DOCUMENTS, id).await
    }

    /// Fetch the extracted text content of a document.
    pub async fn get_document_content(&self, id: i64) -> ApiResult<String> {
        let document = self.get_document(id).await?;
        Ok(document.content.unwrap_or_default())
    }

    pub async fn create_document(&self, payload: &Map<String, Value>) -> ApiResult<Document> {
        self.create_resource(DOCUMENTS, payload).await
    }

    pub async fn update_document(
        &self,
        id: i64,
        fields: &Map<String, Value>,
    ) -> ApiResult<Document> {
        self.update_resource(DOCUMENTS, id, fields).await
    }

    pub async fn delete_document(&self, id: i64) -> ApiResult<()> {
        self.delete_resource(DOCUMENTS, id).await
    }

    /// Full-text search across documents.
    pub async fn search_documents(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<Document>> {
        let query = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        self.get_json(DOCUMENTS, &query).await
    }

    /// Documents similar to the given one, as ranked by paperless.
    pub async fn similar_documents(
        &self,
        id: i64,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<Document>> {
        let query = [
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        self.get_json(&format!("{DOCUMENTS}{id}/similar/"), &query)
            .await
    }

    /// Apply one batched mutation to every document in the request.
    pub async fn bulk_edit_documents(&self, request: &BulkEditRequest) -> ApiResult<Value> {
        self.post_json(&format!("{DOCUMENTS}bulk_edit/"), request)
            .await
    }

    // ========================================================================
    // Correspondents
    // ========================================================================

    pub async fn list_correspondents(
        &self,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<Correspondent>> {
        self.list_resource(CORRESPONDENTS, page, page_size).await
    }

    pub async fn get_correspondent(&self, id: i64) -> ApiResult<Correspondent> {
        self.get_resource(CORRESPONDENTS, id).await
    }

    pub async fn create_correspondent(
        &self,
        payload: &Map<String, Value>,
    ) -> ApiResult<Correspondent> {
        self.create_resource(CORRESPONDENTS, payload).await
    }

    pub async fn update_correspondent(
        &self,
        id: i64,
        fields: &Map<String, Value>,
    ) -> ApiResult<Correspondent> {
        self.update_resource(CORRESPONDENTS, id, fields).await
    }

    pub async fn delete_correspondent(&self, id: i64) -> ApiResult<()> {
        self.delete_resource(CORRESPONDENTS, id).await
    }

    // ========================================================================
    // Document types
    // ========================================================================

    pub async fn list_document_types(
        &self,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<DocumentType>> {
        self.list_resource(DOCUMENT_TYPES, page, page_size).await
    }

    pub async fn get_document_type(&self, id: i64) -> ApiResult<DocumentType> {
        self.get_resource(DOCUMENT_TYPES, id).await
    }

    pub async fn create_document_type(
        &self,
        payload: &Map<String, Value>,
    ) -> ApiResult<DocumentType> {
        self.create_resource(DOCUMENT_TYPES, payload).await
    }

    pub async fn update_document_type(
        &self,
        id: i64,
        fields: &Map<String, Value>,
    ) -> ApiResult<DocumentType> {
        self.update_resource(DOCUMENT_TYPES, id, fields).await
    }

    pub async fn delete_document_type(&self, id: i64) -> ApiResult<()> {
        self.delete_resource(DOCUMENT_TYPES, id).await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    pub async fn list_tags(&self, page: u32, page_size: u32) -> ApiResult<Page<Tag>> {
        self.list_resource(TAGS, page, page_size).await
    }

    pub async fn get_tag(&self, id: i64) -> ApiResult<Tag> {
        self.get_resource(TAGS, id).await
    }

    pub async fn create_tag(&self, payload: &Map<String, Value>) -> ApiResult<Tag> {
        self.create_resource(TAGS, payload).await
    }

    pub async fn update_tag(&self, id: i64, fields: &Map<String, Value>) -> ApiResult<Tag> {
        self.update_resource(TAGS, id, fields).await
    }

    pub async fn delete_tag(&self, id: i64) -> ApiResult<()> {
        self.delete_resource(TAGS, id).await
    }

    // ========================================================================
    // Storage paths
    // ========================================================================

    pub async fn list_storage_paths(
        &self,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<StoragePath>> {
        self.list_resource(STORAGE_PATHS, page, page_size).await
    }

    pub async fn get_storage_path(&self, id: i64) -> ApiResult<StoragePath> {
        self.get_resource(STORAGE_PATHS, id).await
    }

    pub async fn create_storage_path(
        &self,
        payload: &Map<String, Value>,
    ) -> ApiResult<StoragePath> {
        self.create_resource(STORAGE_PATHS, payload).await
    }

    pub async fn update_storage_path(
        &self,
        id: i64,
        fields: &Map<String, Value>,
    ) -> ApiResult<StoragePath> {
        self.update_resource(STORAGE_PATHS, id, fields).await
    }

    pub async fn delete_storage_path(&self, id: i64) -> ApiResult<()> {
        self.delete_resource(STORAGE_PATHS, id).await
    }

    // ========================================================================
    // Custom fields
    // ========================================================================

    pub async fn list_custom_fields(
        &self,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Page<CustomField>> {
        self.list_resource(CUSTOM_FIELDS, page, page_size).await
    }

    pub async fn get_custom_field(&self, id: i64) -> ApiResult<CustomField> {
        self.get_resource(CUSTOM_FIELDS, id).await
    }

    pub async fn create_custom_field(
        &self,
        payload: &Map<String, Value>,
    ) -> ApiResult<CustomField> {
        self.create_resource(CUSTOM_FIELDS, payload).await
    }

    pub async fn update_custom_field(
        &self,
        id: i64,
        fields: &Map<String, Value>,
    ) -> ApiResult<CustomField> {
        self.update_resource(CUSTOM_FIELDS, id, fields).await
    }

    pub async fn delete_custom_field(&self, id: i64) -> ApiResult<()> {
        self.delete_resource(CUSTOM_FIELDS, id).await
    }
}

/// Parse an error response body, preferring the structured message fields
/// paperless uses (`detail`, `message`, `error`) over the raw body.
fn parse_error(status: u16, body: &[u8]) -> ApiError {
    let Ok(data) = serde_json::from_slice::<Value>(body) else {
        return ApiError::status(status, String::from_utf8_lossy(body).into_owned(), None);
    };

    let message = data
        .get("detail")
        .or_else(|| data.get("message"))
        .or_else(|| data.get("error"))
        .and_then(|v| v.as_str())
        .unwrap_or("API request failed")
        .to_string();

    ApiError::status(status, message, Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PaperlessClient::new("http://localhost:8000/", "token");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_parse_error_extracts_detail() {
        let body = br#"{"detail": "No Tag matches the given query."}"#;
        let err = parse_error(404, body);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("No Tag matches"));
    }

    #[test]
    fn test_parse_error_falls_back_to_message_key() {
        let body = br#"{"message": "something broke"}"#;
        let err = parse_error(500, body);
        assert!(err.to_string().contains("something broke"));
    }

    #[test]
    fn test_parse_error_non_json_body() {
        let err = parse_error(502, b"Bad Gateway");
        assert_eq!(err.status_code(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_parse_error_json_without_known_keys() {
        let body = br#"{"name": ["This field is required."]}"#;
        let err = parse_error(400, body);
        assert!(err.to_string().contains("API request failed"));
        match err {
            ApiError::Status { details, .. } => assert!(details.is_some()),
            _ => panic!("expected status error"),
        }
    }

    #[test]
    fn test_bulk_edit_request_omits_unset_fields() {
        let request = BulkEditRequest {
            documents: vec![1, 2, 3],
            add_tags: Some(vec![5]),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["documents"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["add_tags"], serde_json::json!([5]));
        assert!(value.get("remove_tags").is_none());
        assert!(value.get("set_correspondent").is_none());
    }
}
