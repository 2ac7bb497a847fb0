//! Document type management tools.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::domains::tools::ToolError;
use crate::domains::tools::registry::RegisteredTool;
use crate::paperless::PaperlessClient;

use super::common::{
    DeleteResult, ListResult, PaginationParams, decode_params, require_id, require_non_empty,
    to_result_value, tool_model,
};

/// Parameters identifying a single document type.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentTypeIdParams {
    /// ID of the document type.
    #[schemars(description = "Document type ID")]
    pub document_type_id: Option<i64>,
}

/// Parameters for creating a document type.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDocumentTypeParams {
    /// Document type name (required).
    #[schemars(description = "Document type name")]
    pub name: Option<String>,

    /// Auto-matching pattern.
    #[schemars(description = "Auto-matching pattern")]
    #[serde(default)]
    pub r#match: Option<String>,

    /// Matching algorithm identifier.
    #[schemars(description = "Matching algorithm identifier")]
    #[serde(default)]
    pub matching_algorithm: Option<i64>,

    /// Whether matching ignores case.
    #[schemars(description = "Whether matching ignores case")]
    #[serde(default)]
    pub is_insensitive: Option<bool>,
}

/// Parameters for updating a document type. Every key other than
/// `document_type_id` is forwarded to the API unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDocumentTypeParams {
    /// ID of the document type to update.
    #[schemars(description = "Document type ID")]
    pub document_type_id: Option<i64>,

    /// Fields to update, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List document types with pagination.
#[derive(Debug, Clone)]
pub struct ListDocumentTypesTool;

impl ListDocumentTypesTool {
    pub const NAME: &'static str = "list_document_types";
    pub const DESCRIPTION: &'static str =
        "List document types with pagination. Returns names, matching rules, and document counts.";

    pub async fn execute(
        client: &PaperlessClient,
        params: PaginationParams,
    ) -> Result<Value, ToolError> {
        let (page, page_size) = (params.page(), params.page_size());
        info!(page, page_size, "listing document types");
        let data = client.list_document_types(page, page_size).await?;
        to_result_value(&ListResult::from_page(data, page, page_size))
    }

    pub fn to_tool() -> Tool {
        tool_model::<PaginationParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry(client: Arc<PaperlessClient>) -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), move |args| {
            let client = client.clone();
            async move {
                let params = decode_params(args)?;
                Self::execute(&client, params).await
            }
            .boxed()
        })
    }
}

/// Fetch a single document type by ID.
#[derive(Debug, Clone)]
pub struct GetDocumentTypeTool;

impl GetDocumentTypeTool {
    pub const NAME: &'static str = "get_document_type";
    pub const DESCRIPTION: &'static str = "Get a single document type by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: DocumentTypeIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_type_id, "document_type_id")?;
        let document_type = client.get_document_type(id).await?;
        to_result_value(&document_type)
    }

    pub fn to_tool() -> Tool {
        tool_model::<DocumentTypeIdParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry(client: Arc<PaperlessClient>) -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), move |args| {
            let client = client.clone();
            async move {
                let params = decode_params(args)?;
                Self::execute(&client, params).await
            }
            .boxed()
        })
    }
}

/// Create a new document type.
#[derive(Debug, Clone)]
pub struct CreateDocumentTypeTool;

impl CreateDocumentTypeTool {
    pub const NAME: &'static str = "create_document_type";
    pub const DESCRIPTION: &'static str =
        "Create a new document type. Requires a name; matching options are optional.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CreateDocumentTypeParams,
    ) -> Result<Value, ToolError> {
        let name = require_non_empty(params.name.as_deref(), "name")?;

        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        if let Some(pattern) = params.r#match {
            payload.insert("match".into(), json!(pattern));
        }
        if let Some(algorithm) = params.matching_algorithm {
            payload.insert("matching_algorithm".into(), json!(algorithm));
        }
        if let Some(insensitive) = params.is_insensitive {
            payload.insert("is_insensitive".into(), json!(insensitive));
        }

        info!(name, "creating document type");
        let document_type = client.create_document_type(&payload).await?;
        to_result_value(&document_type)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CreateDocumentTypeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry(client: Arc<PaperlessClient>) -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), move |args| {
            let client = client.clone();
            async move {
                let params = decode_params(args)?;
                Self::execute(&client, params).await
            }
            .boxed()
        })
    }
}

/// Update an existing document type.
#[derive(Debug, Clone)]
pub struct UpdateDocumentTypeTool;

impl UpdateDocumentTypeTool {
    pub const NAME: &'static str = "update_document_type";
    pub const DESCRIPTION: &'static str =
        "Update a document type. All provided fields except document_type_id are sent to the API unchanged.";

    pub async fn execute(
        client: &PaperlessClient,
        params: UpdateDocumentTypeParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_type_id, "document_type_id")?;
        if params.fields.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        info!(id, fields = params.fields.len(), "updating document type");
        let document_type = client.update_document_type(id, &params.fields).await?;
        to_result_value(&document_type)
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpdateDocumentTypeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry(client: Arc<PaperlessClient>) -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), move |args| {
            let client = client.clone();
            async move {
                let params = decode_params(args)?;
                Self::execute(&client, params).await
            }
            .boxed()
        })
    }
}

/// Delete a document type.
#[derive(Debug, Clone)]
pub struct DeleteDocumentTypeTool;

impl DeleteDocumentTypeTool {
    pub const NAME: &'static str = "delete_document_type";
    pub const DESCRIPTION: &'static str = "Delete a document type by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: DocumentTypeIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_type_id, "document_type_id")?;
        info!(id, "deleting document type");
        client.delete_document_type(id).await?;
        to_result_value(&DeleteResult::new(id, "Document type"))
    }

    pub fn to_tool() -> Tool {
        tool_model::<DocumentTypeIdParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry(client: Arc<PaperlessClient>) -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), move |args| {
            let client = client.clone();
            async move {
                let params = decode_params(args)?;
                Self::execute(&client, params).await
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PaperlessClient {
        PaperlessClient::new("http://localhost:8000", "test-token")
    }

    #[tokio::test]
    async fn test_get_document_type_requires_id() {
        let params: DocumentTypeIdParams = serde_json::from_value(json!({})).unwrap();
        let err = GetDocumentTypeTool::execute(&client(), params)
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("document_type_id parameter is required")
        );
    }

    #[tokio::test]
    async fn test_create_document_type_requires_name() {
        let params: CreateDocumentTypeParams =
            serde_json::from_value(json!({ "match": "invoice" })).unwrap();
        let err = CreateDocumentTypeTool::execute(&client(), params)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("name parameter is required"));
    }

    #[tokio::test]
    async fn test_update_document_type_rejects_empty_field_set() {
        let params: UpdateDocumentTypeParams =
            serde_json::from_value(json!({ "document_type_id": 2 })).unwrap();
        let err = UpdateDocumentTypeTool::execute(&client(), params)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least one field to update"));
    }
}
