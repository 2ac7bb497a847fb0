//! Tool Registry - central registration and dispatch for all tools.
//!
//! Every tool registers exactly once as a [`RegisteredTool`] pairing its MCP
//! metadata with an async handler. Both transports dispatch through
//! [`ToolRegistry::call_tool`], so validation, logging, and error
//! normalization behave identically over stdio and HTTP.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use rmcp::model::Tool;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::core::config::Config;
use crate::paperless::PaperlessClient;

use super::definitions::correspondents::{
    CreateCorrespondentTool, DeleteCorrespondentTool, GetCorrespondentTool, ListCorrespondentsTool,
    UpdateCorrespondentTool,
};
use super::definitions::custom_fields::{
    CreateCustomFieldTool, DeleteCustomFieldTool, GetCustomFieldTool, ListCustomFieldsTool,
    UpdateCustomFieldTool,
};
use super::definitions::document_types::{
    CreateDocumentTypeTool, DeleteDocumentTypeTool, GetDocumentTypeTool, ListDocumentTypesTool,
    UpdateDocumentTypeTool,
};
use super::definitions::documents::{
    BulkEditDocumentsTool, CreateDocumentTool, DeleteDocumentTool, FindSimilarDocumentsTool,
    GetDocumentContentTool, GetDocumentTool, ListDocumentsTool, SearchDocumentsTool,
    UpdateDocumentTool,
};
use super::definitions::server::{PingTool, ServerInfoTool};
use super::definitions::storage_paths::{
    CreateStoragePathTool, DeleteStoragePathTool, GetStoragePathTool, ListStoragePathsTool,
    UpdateStoragePathTool,
};
use super::definitions::tags::{
    CreateTagTool, DeleteTagTool, GetTagTool, ListTagsTool, UpdateTagTool,
};
use super::error::ToolError;

/// Async handler invoked with the raw JSON arguments of a tool call.
pub type ToolHandlerFn =
    Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// A tool's MCP metadata paired with its handler.
pub struct RegisteredTool {
    pub tool: Tool,
    pub handler: ToolHandlerFn,
}

impl RegisteredTool {
    pub fn new<F>(tool: Tool, handler: F) -> Self
    where
        F: Fn(Value) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync + 'static,
    {
        Self {
            tool,
            handler: Arc::new(handler),
        }
    }
}

/// Tool registry - manages all available tools.
///
/// This struct is the single source of truth for tool metadata and dispatch.
/// Both HTTP and STDIO transports go through it.
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    /// Registration order, preserved for stable listings.
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a registry populated with every paperless tool.
    pub fn new(client: Arc<PaperlessClient>, config: Arc<Config>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
            order: Vec::new(),
        };

        registry.register(PingTool::entry());
        registry.register(ServerInfoTool::entry(config, client.clone()));

        registry.register(ListDocumentsTool::entry(client.clone()));
        registry.register(GetDocumentTool::entry(client.clone()));
        registry.register(GetDocumentContentTool::entry(client.clone()));
        registry.register(CreateDocumentTool::entry(client.clone()));
        registry.register(UpdateDocumentTool::entry(client.clone()));
        registry.register(DeleteDocumentTool::entry(client.clone()));
        registry.register(SearchDocumentsTool::entry(client.clone()));
        registry.register(FindSimilarDocumentsTool::entry(client.clone()));
        registry.register(BulkEditDocumentsTool::entry(client.clone()));

        registry.register(ListTagsTool::entry(client.clone()));
        registry.register(GetTagTool::entry(client.clone()));
        registry.register(CreateTagTool::entry(client.clone()));
        registry.register(UpdateTagTool::entry(client.clone()));
        registry.register(DeleteTagTool::entry(client.clone()));

        registry.register(ListCorrespondentsTool::entry(client.clone()));
        registry.register(GetCorrespondentTool::entry(client.clone()));
        registry.register(CreateCorrespondentTool::entry(client.clone()));
        registry.register(UpdateCorrespondentTool::entry(client.clone()));
        registry.register(DeleteCorrespondentTool::entry(client.clone()));

        registry.register(ListDocumentTypesTool::entry(client.clone()));
        registry.register(GetDocumentTypeTool::entry(client.clone()));
        registry.register(CreateDocumentTypeTool::entry(client.clone()));
        registry.register(UpdateDocumentTypeTool::entry(client.clone()));
        registry.register(DeleteDocumentTypeTool::entry(client.clone()));

        registry.register(ListStoragePathsTool::entry(client.clone()));
        registry.register(GetStoragePathTool::entry(client.clone()));
        registry.register(CreateStoragePathTool::entry(client.clone()));
        registry.register(UpdateStoragePathTool::entry(client.clone()));
        registry.register(DeleteStoragePathTool::entry(client.clone()));

        registry.register(ListCustomFieldsTool::entry(client.clone()));
        registry.register(GetCustomFieldTool::entry(client.clone()));
        registry.register(CreateCustomFieldTool::entry(client.clone()));
        registry.register(UpdateCustomFieldTool::entry(client.clone()));
        registry.register(DeleteCustomFieldTool::entry(client));

        registry
    }

    /// Register a tool. Re-registering a name replaces the previous handler.
    pub fn register(&mut self, entry: RegisteredTool) {
        let name = entry.tool.name.to_string();
        if self.tools.insert(name.clone(), entry).is_some() {
            warn!(tool = %name, "tool re-registered, replacing previous handler");
        } else {
            self.order.push(name);
        }
    }

    /// Get all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Get all tools as Tool models (metadata), in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|entry| entry.tool.clone())
            .collect()
    }

    /// Look up a registered tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a tool call to its handler.
    ///
    /// Validation errors pass through verbatim so the caller sees exactly
    /// which argument was wrong; every other failure is logged and reported
    /// as an execution failure carrying the underlying message.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let Some(entry) = self.tools.get(name) else {
            warn!(tool = %name, "unknown tool requested");
            return Err(ToolError::not_found(name));
        };

        debug!(tool = %name, "dispatching tool call");
        match (entry.handler)(arguments).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_validation() => Err(err),
            Err(ToolError::ExecutionFailed(msg)) => {
                error!(tool = %name, error = %msg, "tool execution failed");
                Err(ToolError::ExecutionFailed(msg))
            }
            Err(err) => {
                error!(tool = %name, error = %err, "tool execution failed");
                Err(ToolError::execution_failed(err.to_string()))
            }
        }
    }
}
