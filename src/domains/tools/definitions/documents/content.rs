//! Document content retrieval tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::Tool;
use serde_json::{Value, json};
use tracing::info;

use crate::domains::tools::ToolError;
use crate::domains::tools::registry::RegisteredTool;
use crate::paperless::PaperlessClient;

use super::super::common::{decode_params, require_id, tool_model};
use super::crud::DocumentIdParams;

/// Fetch the OCR-extracted text of a document.
#[derive(Debug, Clone)]
pub struct GetDocumentContentTool;

impl GetDocumentContentTool {
    pub const NAME: &'static str = "get_document_content";
    pub const DESCRIPTION: &'static str =
        "Get the extracted full-text content of a document by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: DocumentIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_id, "document_id")?;
        info!(id, "fetching document content");
        let content = client.get_document_content(id).await?;
        Ok(json!({ "id": id, "content": content }))
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
