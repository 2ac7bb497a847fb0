//! Bulk document editing tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::domains::tools::ToolError;
use crate::domains::tools::registry::RegisteredTool;
use crate::paperless::{BulkEditRequest, PaperlessClient};

use super::super::common::{decode_params, tool_model};

/// Parameters for bulk-editing documents.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BulkEditParams {
    /// IDs of the documents to edit (required, non-empty).
    #[schemars(description = "IDs of the documents to edit")]
    pub document_ids: Option<Vec<i64>>,

    /// Tag IDs to add to every document.
    #[schemars(description = "Tag IDs to add to every document")]
    #[serde(default)]
    pub add_tags: Option<Vec<i64>>,

    /// Tag IDs to remove from every document.
    #[schemars(description = "Tag IDs to remove from every document")]
    #[serde(default)]
    pub remove_tags: Option<Vec<i64>>,

    /// Correspondent ID to assign to every document.
    #[schemars(description = "Correspondent ID to assign to every document")]
    #[serde(default)]
    pub set_correspondent: Option<i64>,

    /// Document type ID to assign to every document.
    #[schemars(description = "Document type ID to assign to every document")]
    #[serde(default)]
    pub set_document_type: Option<i64>,

    /// Storage path ID to assign to every document.
    #[schemars(description = "Storage path ID to assign to every document")]
    #[serde(default)]
    pub set_storage_path: Option<i64>,
}

impl BulkEditParams {
    /// Validate and convert into the API request. Exactly the provided
    /// operations are forwarded; nothing is defaulted in.
    fn into_request(self) -> Result<BulkEditRequest, ToolError> {
        let documents = match self.document_ids {
            Some(docs) if !docs.is_empty() => docs,
            _ => {
                return Err(ToolError::invalid_arguments(
                    "document_ids parameter is required and must be a non-empty array of integers",
                ));
            }
        };
        if let Some(bad) = documents.iter().find(|id| **id <= 0) {
            return Err(ToolError::invalid_arguments(format!(
                "document ID {bad} is invalid: IDs must be positive integers"
            )));
        }

        let request = BulkEditRequest {
            documents,
            add_tags: self.add_tags,
            remove_tags: self.remove_tags,
            set_correspondent: self.set_correspondent,
            set_document_type: self.set_document_type,
            set_storage_path: self.set_storage_path,
        };

        let has_operation = request.add_tags.is_some()
            || request.remove_tags.is_some()
            || request.set_correspondent.is_some()
            || request.set_document_type.is_some()
            || request.set_storage_path.is_some();
        if !has_operation {
            return Err(ToolError::invalid_arguments(
                "at least one bulk edit operation must be provided",
            ));
        }

        Ok(request)
    }
}

/// Apply one batched mutation to a set of documents.
#[derive(Debug, Clone)]
pub struct BulkEditDocumentsTool;

impl BulkEditDocumentsTool {
    pub const NAME: &'static str = "bulk_edit_documents";
    pub const DESCRIPTION: &'static str =
        "Apply tag, correspondent, document type, or storage path changes to multiple documents in a single operation.";

    pub async fn execute(
        client: &PaperlessClient,
        params: BulkEditParams,
    ) -> Result<Value, ToolError> {
        let request = params.into_request()?;
        let count = request.documents.len();
        info!(documents = count, "bulk editing documents");

        let result = client.bulk_edit_documents(&request).await?;
        Ok(json!({
            "success": true,
            "affected_documents": count,
            "result": result,
        }))
    }

    pub fn to_tool() -> Tool {
        tool_model::<BulkEditParams>(Self::NAME, Self::DESCRIPTION)
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
