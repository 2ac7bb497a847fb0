//! Document search tools: full-text search and similarity lookup.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domains::tools::ToolError;
use crate::domains::tools::registry::RegisteredTool;
use crate::paperless::PaperlessClient;

use super::super::common::{
    ListResult, PaginationParams, decode_params, require_id, require_non_empty, to_result_value,
    tool_model,
};

/// Parameters for full-text document search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchDocumentsParams {
    /// Full-text search query (required).
    #[schemars(description = "Full-text search query")]
    pub query: Option<String>,

    /// Page number to fetch (default: 1).
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default)]
    pub page: Option<i64>,

    /// Results per page (default: 25, max: 100).
    #[schemars(description = "Results per page (default: 25, max: 100)")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Parameters for similarity lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindSimilarParams {
    /// ID of the reference document.
    #[schemars(description = "Document ID to find similar documents for")]
    pub document_id: Option<i64>,

    /// Page number to fetch (default: 1).
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default)]
    pub page: Option<i64>,

    /// Results per page (default: 25, max: 100).
    #[schemars(description = "Results per page (default: 25, max: 100)")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Full-text search across documents.
#[derive(Debug, Clone)]
pub struct SearchDocumentsTool;

impl SearchDocumentsTool {
    pub const NAME: &'static str = "search_documents";
    pub const DESCRIPTION: &'static str =
        "Search documents by full-text query with pagination. Matches titles, content, and metadata.";

    pub async fn execute(
        client: &PaperlessClient,
        params: SearchDocumentsParams,
    ) -> Result<Value, ToolError> {
        let query = require_non_empty(params.query.as_deref(), "query")?;
        let pagination = PaginationParams {
            page: params.page,
            page_size: params.page_size,
        };
        let (page, page_size) = (pagination.page(), pagination.page_size());

        info!(query, page, page_size, "searching documents");
        let data = client.search_documents(query, page, page_size).await?;
        to_result_value(&ListResult::from_page(data, page, page_size))
    }

    pub fn to_tool() -> Tool {
        tool_model::<SearchDocumentsParams>(Self::NAME, Self::DESCRIPTION)
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

/// Find documents similar to a reference document.
#[derive(Debug, Clone)]
pub struct FindSimilarDocumentsTool;

impl FindSimilarDocumentsTool {
    pub const NAME: &'static str = "find_similar_documents";
    pub const DESCRIPTION: &'static str =
        "Find documents similar to a reference document, ranked by the paperless instance.";

    pub async fn execute(
        client: &PaperlessClient,
        params: FindSimilarParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.document_id, "document_id")?;
        let pagination = PaginationParams {
            page: params.page,
            page_size: params.page_size,
        };
        let (page, page_size) = (pagination.page(), pagination.page_size());

        info!(id, page, page_size, "finding similar documents");
        let data = client.similar_documents(id, page, page_size).await?;
        to_result_value(&ListResult::from_page(data, page, page_size))
    }

    pub fn to_tool() -> Tool {
        tool_model::<FindSimilarParams>(Self::NAME, Self::DESCRIPTION)
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
