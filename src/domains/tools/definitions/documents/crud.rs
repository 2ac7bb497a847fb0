//! Document CRUD tools.

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

use super::super::common::{
    DeleteResult, ListResult, PaginationParams, decode_params, require_id, require_non_empty,
    to_result_value, tool_model,
};

/// Parameters identifying a single document.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentIdParams {
    /// ID of the document.
    #[schemars(description = "Document ID")]
    pub document_id: Option<i64>,
}

/// Parameters for creating a document record.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateDocumentParams {
    /// Document title (required).
    #[schemars(description = "Document title")]
    pub title: Option<String>,

    /// Correspondent ID to assign.
    #[schemars(description = "Correspondent ID to assign")]
    #[serde(default)]
    pub correspondent: Option<i64>,

    /// Document type ID to assign.
    #[schemars(description = "Document type ID to assign")]
    #[serde(default)]
    pub document_type: Option<i64>,

    /// Storage path ID to assign.
    #[schemars(description = "Storage path ID to assign")]
    #[serde(default)]
    pub storage_path: Option<i64>,

    /// Tag IDs to attach.
    #[schemars(description = "Tag IDs to attach")]
    #[serde(default)]
    pub tags: Option<Vec<i64>>,

    /// Creation date, RFC 3339 or YYYY-MM-DD.
    #[schemars(description = "Creation date, RFC 3339 or YYYY-MM-DD")]
    #[serde(default)]
    pub created: Option<String>,
}

/// Parameters for updating a document. Every key other than `document_id`
/// is forwarded to the API unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDocumentParams {
    /// ID of the document to update.
    #[schemars(description = "Document ID")]
    pub document_id: Option<i64>,

    /// Fields to update, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List documents with pagination.
#[derive(Debug, Clone)]
pub struct ListDocumentsTool;

impl ListDocumentsTool {
    pub const NAME: &'static str = "list_documents";
    pub const DESCRIPTION: &'static str =
        "List documents with pagination. Returns titles, assigned correspondents, types, tags, and dates.";

    pub async fn execute(
        client: &PaperlessClient,
        params: PaginationParams,
    ) -> Result<Value, ToolError> {
        let (page, page_size) = (params.page(), params.page_size());
        info!(page, page_size, "listing documents");
        let data = client.list_documents(page, page_size).await?;
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

/// Fetch a single document by ID.
#[derive(Debug, Clone)]
pub struct GetDocumentTool;

impl GetDocumentTool {
    pub const NAME: &'static str = "get_document";
    pub const DESCRIPTION: &'static str =
        "Get a single document by its ID, including metadata, tags, notes, and custom field values.";

    pub async fn execute(
        client: &PaperlessClient,
        params: DocumentIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_id, "document_id")?;
        let document = client.get_document(id).await?;
        to_result_value(&document)
    }

    pub fn to_tool() -> Tool {
        tool_model::<DocumentIdParams>(Self::NAME, Self::DESCRIPTION)
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

/// Create a new document record.
#[derive(Debug, Clone)]
pub struct CreateDocumentTool;

impl CreateDocumentTool {
    pub const NAME: &'static str = "create_document";
    pub const DESCRIPTION: &'static str =
        "Create a document record. Requires a title; correspondent, type, storage path, tags, and creation date are optional.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CreateDocumentParams,
    ) -> Result<Value, ToolError> {
        let title = require_non_empty(params.title.as_deref(), "title")?;

        let mut payload = Map::new();
        payload.insert("title".into(), json!(title));
        if let Some(correspondent) = params.correspondent {
            payload.insert("correspondent".into(), json!(correspondent));
        }
        if let Some(document_type) = params.document_type {
            payload.insert("document_type".into(), json!(document_type));
        }
        if let Some(storage_path) = params.storage_path {
            payload.insert("storage_path".into(), json!(storage_path));
        }
        if let Some(tags) = params.tags {
            payload.insert("tags".into(), json!(tags));
        }
        if let Some(created) = params.created {
            payload.insert("created".into(), json!(created));
        }

        info!(title, "creating document");
        let document = client.create_document(&payload).await?;
        to_result_value(&document)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CreateDocumentParams>(Self::NAME, Self::DESCRIPTION)
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

/// Update an existing document.
#[derive(Debug, Clone)]
pub struct UpdateDocumentTool;

impl UpdateDocumentTool {
    pub const NAME: &'static str = "update_document";
    pub const DESCRIPTION: &'static str =
        "Update a document. All provided fields except document_id are sent to the API unchanged.";

    pub async fn execute(
        client: &PaperlessClient,
        params: UpdateDocumentParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_id, "document_id")?;
        if params.fields.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        info!(id, fields = params.fields.len(), "updating document");
        let document = client.update_document(id, &params.fields).await?;
        to_result_value(&document)
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpdateDocumentParams>(Self::NAME, Self::DESCRIPTION)
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

/// Delete a document.
#[derive(Debug, Clone)]
pub struct DeleteDocumentTool;

impl DeleteDocumentTool {
    pub const NAME: &'static str = "delete_document";
    pub const DESCRIPTION: &'static str =
        "Delete a document by its ID. The stored file is removed by the paperless instance.";

    pub async fn execute(
        client: &PaperlessClient,
        params: DocumentIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_id, "document_id")?;
        info!(id, "deleting document");
        client.delete_document(id).await?;
        to_result_value(&DeleteResult::new(id, "Document"))
    }

    pub fn to_tool() -> Tool {
        tool_model::<DocumentIdParams>(Self::NAME, Self::DESCRIPTION)
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
