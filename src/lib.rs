//! Paperless MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes a
//! paperless-ngx document archive as callable tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the main server handler, and
//!   the transport layer (stdio and HTTP)
//! - **domains::tools**: Tool definitions, the registry, and dispatch
//! - **paperless**: The authenticated REST client and entity types
//!
//! # Example
//!
//! ```rust,no_run
//! use paperless_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod paperless;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
