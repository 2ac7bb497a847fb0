//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, grouped by paperless
//! resource. Each tool defines a parameters struct, an `execute()` method,
//! and an `entry()` that registers it. The registry is built once at startup
//! and shared by every transport, so adding a tool never touches this file.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_tool_router};
use crate::paperless::PaperlessClient;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and dispatches
/// every tool call through the shared [`ToolRegistry`].
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared tool registry; the single dispatch path for all transports.
    registry: Arc<ToolRegistry>,

    /// Tool router for the rmcp stdio transport.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let client = Arc::new(PaperlessClient::new(
            config.paperless.url.clone(),
            config.paperless.token.clone(),
        ));
        let registry = Arc::new(ToolRegistry::new(client, config.clone()));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            registry,
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the shared tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This server exposes a paperless-ngx document archive as tools: \
                 list, search, create, update, and delete documents, tags, \
                 correspondents, document types, storage paths, and custom fields."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> McpServer {
        McpServer::new(Config::default())
    }

    #[test]
    fn test_server_reports_config_identity() {
        let server = test_server();
        assert_eq!(server.name(), "paperless-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_get_info_advertises_tools_only() {
        let server = test_server();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.is_some());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_list_tools_includes_schemas() {
        let server = test_server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 36);
        for tool in &tools {
            assert!(tool["name"].is_string());
            assert!(tool["inputSchema"].is_object());
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_unknown_name() {
        let server = test_server();
        let err = server
            .call_tool("does_not_exist", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
