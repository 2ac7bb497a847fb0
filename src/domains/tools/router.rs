//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! The router is a thin adapter: every route delegates to
//! [`ToolRegistry::call_tool`], so stdio traffic goes through exactly the
//! same dispatch, validation, and error normalization as HTTP traffic.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};
use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use super::registry::ToolRegistry;

/// Build the tool router with every registered tool.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();
    for tool in registry.tools() {
        let name = tool.name.to_string();
        let registry = registry.clone();
        router = router.with_route(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let registry = registry.clone();
            let name = name.clone();
            async move {
                match registry.call_tool(&name, Value::Object(args)).await {
                    Ok(value) => Ok(CallToolResult {
                        content: vec![Content::text(value.to_string())],
                        structured_content: Some(value),
                        is_error: Some(false),
                        meta: None,
                    }),
                    Err(err) if err.is_validation() => {
                        Err(McpError::invalid_params(err.to_string(), None))
                    }
                    Err(err) => Ok(CallToolResult::error(vec![Content::text(err.to_string())])),
                }
            }
            .boxed()
        }));
    }
    router
}
