//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools wrap paperless-ngx REST operations so MCP clients can call them.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations, grouped by resource
//! - `registry.rs` - Central tool registry; the single dispatch path
//! - `router.rs` - rmcp ToolRouter adapter for the stdio transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create the tool in `definitions/` (params, execute(), to_tool(), entry())
//! 2. Export it in `definitions/mod.rs`
//! 3. Register its `entry()` in `ToolRegistry::new`
//!
//! Both transports pick it up from the registry; nothing else changes.

pub mod definitions;
mod error;
pub mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::{RegisteredTool, ToolRegistry};
pub use router::build_tool_router;
