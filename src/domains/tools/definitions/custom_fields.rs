//! Custom field management tools.

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

/// Parameters identifying a single custom field.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CustomFieldIdParams {
    /// ID of the custom field.
    #[schemars(description = "Custom field ID")]
    pub field_id: Option<i64>,
}

/// Parameters for creating a custom field.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCustomFieldParams {
    /// Custom field name (required).
    #[schemars(description = "Custom field name")]
    pub name: Option<String>,

    /// Data type, e.g. "string", "integer", "date", "boolean", "monetary" (required).
    #[schemars(description = "Data type, e.g. string, integer, date, boolean, monetary")]
    pub data_type: Option<String>,
}

/// Parameters for updating a custom field. Every key other than `field_id`
/// is forwarded to the API unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCustomFieldParams {
    /// ID of the custom field to update.
    #[schemars(description = "Custom field ID")]
    pub field_id: Option<i64>,

    /// Fields to update, forwarded verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// List custom fields with pagination.
#[derive(Debug, Clone)]
pub struct ListCustomFieldsTool;

impl ListCustomFieldsTool {
    pub const NAME: &'static str = "list_custom_fields";
    pub const DESCRIPTION: &'static str =
        "List custom field definitions with pagination. Returns names and data types.";

    pub async fn execute(
        client: &PaperlessClient,
        params: PaginationParams,
    ) -> Result<Value, ToolError> {
        let (page, page_size) = (params.page(), params.page_size());
        info!(page, page_size, "listing custom fields");
        let data = client.list_custom_fields(page, page_size).await?;
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

/// Fetch a single custom field by ID.
#[derive(Debug, Clone)]
pub struct GetCustomFieldTool;

impl GetCustomFieldTool {
    pub const NAME: &'static str = "get_custom_field";
    pub const DESCRIPTION: &'static str = "Get a single custom field definition by its ID.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CustomFieldIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.field_id, "field_id")?;
        let field = client.get_custom_field(id).await?;
        to_result_value(&field)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CustomFieldIdParams>(Self::NAME, Self::DESCRIPTION)
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

/// Create a new custom field.
#[derive(Debug, Clone)]
pub struct CreateCustomFieldTool;

impl CreateCustomFieldTool {
    pub const NAME: &'static str = "create_custom_field";
    pub const DESCRIPTION: &'static str =
        "Create a new custom field definition. Requires a name and a data type.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CreateCustomFieldParams,
    ) -> Result<Value, ToolError> {
        let name = require_non_empty(params.name.as_deref(), "name")?;
        let data_type = require_non_empty(params.data_type.as_deref(), "data_type")?;

        let mut payload = Map::new();
        payload.insert("name".into(), json!(name));
        payload.insert("data_type".into(), json!(data_type));

        info!(name, data_type, "creating custom field");
        let field = client.create_custom_field(&payload).await?;
        to_result_value(&field)
    }

    pub fn to_tool() -> Tool {
        tool_model::<CreateCustomFieldParams>(Self::NAME, Self::DESCRIPTION)
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

/// Update an existing custom field.
#[derive(Debug, Clone)]
pub struct UpdateCustomFieldTool;

impl UpdateCustomFieldTool {
    pub const NAME: &'static str = "update_custom_field";
    pub const DESCRIPTION: &'static str =
        "Update a custom field definition. All provided fields except field_id are sent to the API unchanged.";

    pub async fn execute(
        client: &PaperlessClient,
        params: UpdateCustomFieldParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.field_id, "field_id")?;
        if params.fields.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        info!(id, fields = params.fields.len(), "updating custom field");
        let field = client.update_custom_field(id, &params.fields).await?;
        to_result_value(&field)
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpdateCustomFieldParams>(Self::NAME, Self::DESCRIPTION)
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

/// Delete a custom field.
#[derive(Debug, Clone)]
pub struct DeleteCustomFieldTool;

impl DeleteCustomFieldTool {
    pub const NAME: &'static str = "delete_custom_field";
    pub const DESCRIPTION: &'static str =
        "Delete a custom field definition by its ID. Values on documents are removed by the API.";

    pub async fn execute(
        client: &PaperlessClient,
        params: CustomFieldIdParams,
    ) -> Result<Value, ToolError> {
        let id = require_id(params.field_id, "field_id")?;
        info!(id, "deleting custom field");
        client.delete_custom_field(id).await?;
        to_result_value(&DeleteResult::new(id, "Custom field"))
    }

    pub fn to_tool() -> Tool {
        tool_model::<CustomFieldIdParams>(Self::NAME, Self::DESCRIPTION)
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
