//! Storage path management tools.

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

/// Parameters identifying a single storage path.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StoragePathIdParams {
    /// ID of the storage path.
    #[schemars(description = "Storage path ID")]
    pub storage_path_id: Option<i64>,
}

/// Parameters for creating a storage path.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateStoragePathParams {
    /// Storage path name (required).
    #[schemars(description = "Storage path name")]
    pub name: Option<String>,

    /// Filesystem path template, e.g. "{created_year}/{title}" (required).
    #[schemars(description = "Filesystem path template, e.g. {created_year}/{title}")]
    pub path: Option<String>,

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

/// Parameters for updating a storage path. Every key other than
/// `storage_path_id` is forwarded to the API unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateStoragePathParams {
    /// ID of the storage path to update.
    #[schemars(description = "Storage path ID")]
    pub storage_path_id: Option<i64>,

    /// Fields to update, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List storage paths with pagination.
#[derive(Debug, Clone)]
pub struct ListStoragePathsTool;

impl ListStoragePathsTool {
    pub const NAME: &'static str = "list_storage_paths";
    pub const DESCRIPTION: &'static str =
        "List storage paths with pagination. Returns names, path templates, and document counts.";

    pub async fn execute(
        client: &PaperlessClient,
        params: PaginationParams,
    ) -> Result<Value, ToolError> {
        let (page, page_size) = (params.page(), params.page_size());
        info!(page, page_size, "listing storage paths");
        let data = client.list_storage_paths(page, page_size).await?;
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

/// Fetch a single storage path by ID.
#[derive(Debug, Clone)]
pub struct GetStoragePathTool;

impl GetStoragePathTool {
    pub const NAME: &'static str = "get_storage_path";
    pub const DESCRIPTION: &'static str = "Get a single storage path by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: StoragePathIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.storage_path_id, "storage_path_id")?;
        let storage_path = client.get_storage_path(id).await?;
        to_result_value(&storage_path)
    }

    pub fn to_tool() -> Tool {
        tool_model::<StoragePathIdParams>(Self::NAME, Self::DESCRIPTION)
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

/// Create a new storage path.
#[derive(Debug, Clone)]
pub struct CreateStoragePathTool;

impl CreateStoragePathTool {
    pub const NAME: &'static str = "create_storage_path";
    pub const DESCRIPTION: &'static str =
        "Create a new storage path. Requires a name and a path template; matching options are optional.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CreateStoragePathParams,
    ) -> Result<Value, ToolError> {
        let name = require_non_empty(params.name.as_deref(), "name")?;
        let path = require_non_empty(params.path.as_deref(), "path")?;

        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        payload.insert("path".into(), json!(path));
        if let Some(pattern) = params.r#match {
            payload.insert("match".into(), json!(pattern));
        }
        if let Some(algorithm) = params.matching_algorithm {
            payload.insert("matching_algorithm".into(), json!(algorithm));
        }
        if let Some(insensitive) = params.is_insensitive {
            payload.insert("is_insensitive".into(), json!(insensitive));
        }

        info!(name, "creating storage path");
        let storage_path = client.create_storage_path(&payload).await?;
        to_result_value(&storage_path)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CreateStoragePathParams>(Self::NAME, Self::DESCRIPTION)
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

/// Update an existing storage path.
#[derive(Debug, Clone)]
pub struct UpdateStoragePathTool;

impl UpdateStoragePathTool {
    pub const NAME: &'static str = "update_storage_path";
    pub const DESCRIPTION: &'static str =
        "Update a storage path. All provided fields except storage_path_id are sent to the API unchanged.";

    pub async fn execute(
        client: &PaperlessClient,
        params: UpdateStoragePathParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.storage_path_id, "storage_path_id")?;
        if params.fields.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        info!(id, fields = params.fields.len(), "updating storage path");
        let storage_path = client.update_storage_path(id, &params.fields).await?;
        to_result_value(&storage_path)
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpdateStoragePathParams>(Self::NAME, Self::DESCRIPTION)
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

/// Delete a storage path.
#[derive(Debug, Clone)]
pub struct DeleteStoragePathTool;

impl DeleteStoragePathTool {
    pub const NAME: &'static str = "delete_storage_path";
    pub const DESCRIPTION: &'static str = "Delete a storage path by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: StoragePathIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.storage_path_id, "storage_path_id")?;
        info!(id, "deleting storage path");
        client.delete_storage_path(id).await?;
        to_result_value(&DeleteResult::new(id, "Storage path"))
    }

    pub fn to_tool() -> Tool {
        tool_model::<StoragePathIdParams>(Self::NAME, Self::DESCRIPTION)
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
