//! Domains module containing business logic organized by bounded contexts.
//!
//! The tools domain is the single business context of this server: it wraps
//! the paperless-ngx REST API as MCP tools.

pub mod tools;
