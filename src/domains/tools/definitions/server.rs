//! Server health and identity tools.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::RegisteredTool;
use crate::paperless::PaperlessClient;

use super::common::tool_model;

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Liveness check tool.
#[derive(Debug, Clone)]
pub struct PingTool;

impl PingTool {
    pub const NAME: &'static str = "ping";
    pub const DESCRIPTION: &'static str =
        "Check that the server is alive. Returns a static acknowledgement without contacting the paperless instance.";

    pub fn execute() -> Result<Value, ToolError> {
        Ok(json!({ "status": "ok" }))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NoParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry() -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), |_args| {
            async move { Self::execute() }.boxed()
        })
    }
}

/// Server identity tool.
#[derive(Debug, Clone)]
pub struct ServerInfoTool;

impl ServerInfoTool {
    pub const NAME: &'static str = "server_info";
    pub const DESCRIPTION: &'static str =
        "Get server name, version, and the URL of the connected paperless-ngx instance.";

    pub fn execute(config: &Config, client: &PaperlessClient) -> Result<Value, ToolError> {
        Ok(json!({
            "name": config.server.name,
            "version": config.server.version,
            "paperless_url": client.base_url(),
        }))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NoParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn entry(config: Arc<Config>, client: Arc<PaperlessClient>) -> RegisteredTool {
        RegisteredTool::new(Self::to_tool(), move |_args| {
            let config = config.clone();
            let client = client.clone();
            async move { Self::execute(&config, &client) }.boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_returns_ok() {
        let value = PingTool::execute().unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[test]
    fn test_server_info_reports_instance_url() {
        let config = Config::default();
        let client = PaperlessClient::new("http://localhost:8000/", "token");
        let value = ServerInfoTool::execute(&config, &client).unwrap();
        assert_eq!(value["name"], config.server.name);
        assert_eq!(value["paperless_url"], "http://localhost:8000");
    }
}
