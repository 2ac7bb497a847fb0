//! Tag management tools.

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

/// Parameters identifying a single tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TagIdParams {
    /// ID of the tag.
    #[schemars(description = "Tag ID")]
    pub tag_id: Option<i64>,
}

/// Parameters for creating a tag.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTagParams {
    /// Tag name (required).
    #[schemars(description = "Tag name")]
    pub name: Option<String>,

    /// Display color as a hex string, e.g. "#ff0000" (required).
    #[schemars(description = "Tag color as a hex string, e.g. #ff0000")]
    pub color: Option<String>,

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

    /// Whether this tag marks inbox documents.
    #[schemars(description = "Whether this tag marks inbox documents")]
    #[serde(default)]
    pub is_inbox_tag: Option<bool>,
}

/// Parameters for updating a tag. Every key other than `tag_id` is
/// forwarded to the API unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTagParams {
    /// ID of the tag to update.
    #[schemars(description = "Tag ID")]
    pub tag_id: Option<i64>,

    /// Fields to update, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List tags with pagination.
#[derive(Debug, Clone)]
pub struct ListTagsTool;

impl ListTagsTool {
    pub const NAME: &'static str = "list_tags";
    pub const DESCRIPTION: &'static str =
        "List tags with pagination. Returns names, colors, matching rules, and document counts.";

    pub async fn execute(
        client: &PaperlessClient,
        params: PaginationParams,
    ) -> Result<Value, ToolError> {
        let (page, page_size) = (params.page(), params.page_size());
        info!(page, page_size, "listing tags");
        let data = client.list_tags(page, page_size).await?;
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

/// Fetch a single tag by ID.
#[derive(Debug, Clone)]
pub struct GetTagTool;

impl GetTagTool {
    pub const NAME: &'static str = "get_tag";
    pub const DESCRIPTION: &'static str = "Get a single tag by its ID.";

    pub async fn execute(client: &PaperlessClient, params: TagIdParams) -> Result<Value, ToolError> {
        let id = require_id(params.tag_id, "tag_id")?;
        let tag = client.get_tag(id).await?;
        to_result_value(&tag)
    }

    pub fn to_tool() -> Tool {
        tool_model::<TagIdParams>(Self::NAME, Self::DESCRIPTION)
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

/// Create a new tag.
#[derive(Debug, Clone)]
pub struct CreateTagTool;

impl CreateTagTool {
    pub const NAME: &'static str = "create_tag";
    pub const DESCRIPTION: &'static str =
        "Create a new tag. Requires a name and a color; matching options are optional.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CreateTagParams,
    ) -> Result<Value, ToolError> {
        let name = require_non_empty(params.name.as_deref(), "name")?;
        let color = require_non_empty(params.color.as_deref(), "color")?;

        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        payload.insert("color".into(), json!(color));
        if let Some(pattern) = params.r#match {
            payload.insert("match".into(), json!(pattern));
        }
        if let Some(algorithm) = params.matching_algorithm {
            payload.insert("matching_algorithm".into(), json!(algorithm));
        }
        if let Some(insensitive) = params.is_insensitive {
            payload.insert("is_insensitive".into(), json!(insensitive));
        }
        if let Some(inbox) = params.is_inbox_tag {
            payload.insert("is_inbox_tag".into(), json!(inbox));
        }

        info!(name, "creating tag");
        let tag = client.create_tag(&payload).await?;
        to_result_value(&tag)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CreateTagParams>(Self::NAME, Self::DESCRIPTION)
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

/// Update an existing tag.
#[derive(Debug, Clone)]
pub struct UpdateTagTool;

impl UpdateTagTool {
    pub const NAME: &'static str = "update_tag";
    pub const DESCRIPTION: &'static str =
        "Update a tag. All provided fields except tag_id are sent to the API unchanged.";

    pub async fn execute(
        client: &PaperlessClient,
        params: UpdateTagParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.tag_id, "tag_id")?;
        if params.fields.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        info!(id, fields = params.fields.len(), "updating tag");
        let tag = client.update_tag(id, &params.fields).await?;
        to_result_value(&tag)
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpdateTagParams>(Self::NAME, Self::DESCRIPTION)
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

/// Delete a tag.
#[derive(Debug, Clone)]
pub struct DeleteTagTool;

impl DeleteTagTool {
    pub const NAME: &'static str = "delete_tag";
    pub const DESCRIPTION: &'static str =
        "Delete a tag by its ID. Documents carrying the tag are not deleted.";

    pub async fn execute(client: &PaperlessClient, params: TagIdParams) -> Result<Value, ToolError> {
        let id = require_id(params.tag_id, "tag_id")?;
        info!(id, "deleting tag");
        client.delete_tag(id).await?;
        to_result_value(&DeleteResult::new(id, "Tag"))
    }

    pub fn to_tool() -> Tool {
        tool_model::<TagIdParams>(Self::NAME, Self::DESCRIPTION)
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
