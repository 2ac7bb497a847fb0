//! Paperless-ngx REST API client.
//!
//! This module owns all communication with the backing paperless instance:
//! the authenticated HTTP client, the entity types mirrored from the API,
//! and the typed error carrying the HTTP status of failed calls.

mod client;
mod error;
mod types;

pub use client::{BulkEditRequest, PaperlessClient, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use error::{ApiError, ApiResult};
pub use types::{
    Correspondent, CustomField, CustomFieldValue, Document, DocumentType, FlexibleDateTime, Note,
    Page, StoragePath, Tag,
};
