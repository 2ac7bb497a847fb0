//! Shared helpers for paperless tool definitions.
//!
//! Pagination normalization, argument validation, and the result envelopes
//! every resource tool uses. Validation failures happen before any HTTP
//! request is made.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domains::tools::ToolError;
use crate::paperless::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page};

/// Default page number for list operations.
pub const DEFAULT_PAGE: u32 = 1;

/// Pagination parameters accepted by every list-style tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PaginationParams {
    /// Page number to fetch (default: 1).
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default)]
    pub page: Option<i64>,

    /// Results per page (default: 25, max: 100).
    #[schemars(description = "Results per page (default: 25, max: 100)")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Normalized page number: defaults to 1, never below 1.
    pub fn page(&self) -> u32 {
        match self.page {
            Some(p) if p >= 1 => p as u32,
            _ => DEFAULT_PAGE,
        }
    }

    /// Normalized page size: defaults to 25, clamped to 1..=100.
    pub fn page_size(&self) -> u32 {
        match self.page_size {
            Some(s) if s >= 1 => (s as u32).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

/// Result envelope for list and search operations.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ListResult<T> {
    pub count: i64,
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub items: Vec<T>,
}

impl<T> ListResult<T> {
    /// Build the envelope from an API page and the normalized pagination.
    pub fn from_page(page_data: Page<T>, page: u32, page_size: u32) -> Self {
        Self {
            count: page_data.count,
            page,
            page_size,
            has_next: page_data.next.is_some(),
            has_prev: page_data.previous.is_some(),
            items: page_data.results,
        }
    }
}

/// Result envelope for delete operations.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DeleteResult {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

impl DeleteResult {
    pub fn new(id: i64, resource: &str) -> Self {
        Self {
            success: true,
            id,
            message: format!("{resource} deleted successfully"),
        }
    }
}

/// Build the MCP tool model for a parameter type.
pub fn tool_model<P: JsonSchema + 'static>(
    name: &'static str,
    description: &'static str,
) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Decode raw call arguments into a typed parameter struct.
///
/// Any shape mismatch is a caller error, reported verbatim.
pub fn decode_params<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Require an integer ID argument that is present and positive.
pub fn require_id(value: Option<i64>, field: &str) -> Result<i64, ToolError> {
    match value {
        None => Err(ToolError::invalid_arguments(format!(
            "{field} parameter is required and must be an integer"
        ))),
        Some(id) if id <= 0 => Err(ToolError::invalid_arguments(format!(
            "{field} must be a positive integer"
        ))),
        Some(id) => Ok(id),
    }
}

/// Require a string argument that is present and non-empty.
pub fn require_non_empty<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ToolError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ToolError::invalid_arguments(format!(
            "{field} parameter is required and must be a non-empty string"
        ))),
    }
}

/// Serialize a tool result value, mapping serialization failure to an
/// internal error (never a caller error).
pub fn to_result_value<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::internal(e.to_string()))
}
