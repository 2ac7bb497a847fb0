//! Tool-specific error types.

use thiserror::Error;

use crate::paperless::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error represents a caller mistake rather than a backend
    /// failure. Validation errors must surface to the client verbatim.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }
}

impl From<ApiError> for ToolError {
    fn from(err: ApiError) -> Self {
        Self::ExecutionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_becomes_execution_failure() {
        let api = ApiError::status(404, "No Tag matches the given query.", None);
        let err = ToolError::from(api);
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
        assert!(err.to_string().contains("No Tag matches"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(ToolError::invalid_arguments("bad").is_validation());
        assert!(!ToolError::execution_failed("boom").is_validation());
        assert!(!ToolError::not_found("x").is_validation());
    }
}
