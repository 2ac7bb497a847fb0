//! Correspondent management tools.

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

/// Parameters identifying a single correspondent.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CorrespondentIdParams {
    /// ID of the correspondent.
    #[schemars(description = "Correspondent ID")]
    pub correspondent_id: Option<i64>,
}

/// Parameters for creating a correspondent.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCorrespondentParams {
    /// Correspondent name (required).
    #[schemars(description = "Correspondent name")]
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

/// Parameters for updating a correspondent. Every key other than
/// `correspondent_id` is forwarded to the API unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCorrespondentParams {
    /// ID of the correspondent to update.
    #[schemars(description = "Correspondent ID")]
    pub correspondent_id: Option<i64>,

    /// Fields to update, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List correspondents with pagination.
#[derive(Debug, Clone)]
pub struct ListCorrespondentsTool;

impl ListCorrespondentsTool {
    pub const NAME: &'static str = "list_correspondents";
    pub const DESCRIPTION: &'static str =
        "List correspondents with pagination. Returns names, matching rules, and document counts.";

    pub async fn execute(
        client: &PaperlessClient,
        params: PaginationParams,
    ) -> Result<Value, ToolError> {
        let (page, page_size) = (params.page(), params.page_size());
        info!(page, page_size, "listing correspondents");
        let data = client.list_correspondents(page, page_size).await?;
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

/// Fetch a single correspondent by ID.
#[derive(Debug, Clone)]
pub struct GetCorrespondentTool;

impl GetCorrespondentTool {
    pub const NAME: &'static str = "get_correspondent";
    pub const DESCRIPTION: &'static str = "Get a single correspondent by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CorrespondentIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.correspondent_id, "correspondent_id")?;
        let correspondent = client.get_correspondent(id).await?;
        to_result_value(&correspondent)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CorrespondentIdParams>(Self::NAME, Self::DESCRIPTION)
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

/// Create a new correspondent.
#[derive(Debug, Clone)]
pub struct CreateCorrespondentTool;

impl CreateCorrespondentTool {
    pub const NAME: &'static str = "create_correspondent";
    pub const DESCRIPTION: &'static str =
        "Create a new correspondent. Requires a name; matching options are optional.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CreateCorrespondentParams,
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

        info!(name, "creating correspondent");
        let correspondent = client.create_correspondent(&payload).await?;
        to_result_value(&correspondent)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CreateCorrespondentParams>(Self::NAME, Self::DESCRIPTION)
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

/// Update an existing correspondent.
#[derive(Debug, Clone)]
pub struct UpdateCorrespondentTool;

impl UpdateCorrespondentTool {
    pub const NAME: &'static str = "update_correspondent";
    pub const DESCRIPTION: &'static str =
        "Update a correspondent. All provided fields except correspondent_id are sent to the API unchanged.";

    pub async fn execute(
        client: &PaperlessClient,
        params: UpdateCorrespondentParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.correspondent_id, "correspondent_id")?;
        if params.fields.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        info!(id, fields = params.fields.len(), "updating correspondent");
        let correspondent = client.update_correspondent(id, &params.fields).await?;
        to_result_value(&correspondent)
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpdateCorrespondentParams>(Self::NAME, Self::DESCRIPTION)
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

/// Delete a correspondent.
#[derive(Debug, Clone)]
pub struct DeleteCorrespondentTool;

impl DeleteCorrespondentTool {
    pub const NAME: &'static str = "delete_correspondent";
    pub const DESCRIPTION: &'static str = "Delete a correspondent by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CorrespondentIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.correspondent_id, "correspondent_id")?;
        info!(id, "deleting correspondent");
        client.delete_correspondent(id).await?;
        to_result_value(&DeleteResult::new(id, "Correspondent"))
    }

    pub fn to_tool() -> Tool {
        tool_model::<CorrespondentIdParams>(Self::NAME, Self::DESCRIPTION)
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
    async fn test_get_correspondent_requires_id() {
        let params: CorrespondentIdParams = serde_json::from_value(json!({})).unwrap();
        let err = GetCorrespondentTool::execute(&client(), params)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(
            err.to_string()
                .contains("correspondent_id parameter is required")
        );
    }

    #[tokio::test]
    async fn test_create_correspondent_requires_name() {
        let params: CreateCorrespondentParams = serde_json::from_value(json!({})).unwrap();
        let err = CreateCorrespondentTool::execute(&client(), params)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("name parameter is required"));
    }

    #[tokio::test]
    async fn test_update_correspondent_rejects_empty_field_set() {
        let params: UpdateCorrespondentParams =
            serde_json::from_value(json!({ "correspondent_id": 5 })).unwrap();
        let err = UpdateCorrespondentTool::execute(&client(), params)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least one field to update"));
    }

    #[test]
    fn test_update_params_forward_arbitrary_keys() {
        let params: UpdateCorrespondentParams = serde_json::from_value(json!({
            "correspondent_id": 5,
            "name": "ACME Corp",
            "matching_algorithm": 2,
            "some_future_field": true
        }))
        .unwrap();
        assert_eq!(params.fields.len(), 3);
        assert_eq!(params.fields["some_future_field"], true);
        assert!(!params.fields.contains_key("correspondent_id"));
    }
}
