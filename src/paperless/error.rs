//! Paperless API error types.

use thiserror::Error;

/// Result type for paperless API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the paperless API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-2xx status code.
    #[error("paperless API error (status {status}): {message}")]
    Status {
        status: u16,
        message: String,
        /// Parsed error payload, when the body was valid JSON.
        details: Option<serde_json::Value>,
    },

    /// The outbound request failed at the network layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body could not be parsed into the expected shape.
    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Create a status error from an HTTP status code and message.
    pub fn status(status: u16, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self::Status {
            status,
            message: message.into(),
            details,
        }
    }

    /// Whether this error is a 404 from the backing API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Whether this error is a credential/permission failure (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// The HTTP status code, when the API answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
