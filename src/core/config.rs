//! Configuration management for the MCP server.
//!
//! Configuration comes from environment variables (a `.env` file is honored
//! when present). The paperless connection settings are mandatory; the
//! server refuses to start without them.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::transport::TransportConfig;

/// Log levels accepted in `LOG_LEVEL`.
const VALID_LOG_LEVELS: &[&str] = &["debug", "info", "warn", "error"];

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Connection settings for the paperless-ngx instance.
    pub paperless: PaperlessConfig,

    /// Optional bearer token required on HTTP requests. `None` disables
    /// authentication. Never applies to `/health`.
    pub auth_token: Option<String>,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Connection settings for the backing paperless-ngx instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct PaperlessConfig {
    /// Base URL of the instance, e.g. `http://localhost:8000`.
    pub url: String,

    /// API token used for every request.
    pub token: String,
}

impl PaperlessConfig {
    /// Token rendering safe for startup logs: first four characters, rest
    /// replaced.
    pub fn masked_token(&self) -> String {
        if self.token.len() <= 4 {
            "****".to_string()
        } else {
            format!("{}****", &self.token[..4])
        }
    }
}

/// Custom Debug implementation to redact the API token from logs.
impl std::fmt::Debug for PaperlessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperlessConfig")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter ("debug", "info", "warn", or "error").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "paperless-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            paperless: PaperlessConfig {
                url: "http://localhost:8000".to_string(),
                token: String::new(),
            },
            auth_token: None,
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `PAPERLESS_URL`, `PAPERLESS_TOKEN`.
    /// Optional: `MCP_AUTH_TOKEN`, `LOG_LEVEL`, `MCP_TRANSPORT`,
    /// `MCP_HTTP_PORT`, `MCP_HTTP_HOST`, `MCP_HTTP_PATH`, `MCP_HTTP_CORS`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        config.paperless.url = std::env::var("PAPERLESS_URL")
            .map_err(|_| Error::config("PAPERLESS_URL environment variable is required"))?;
        config.paperless.token = std::env::var("PAPERLESS_TOKEN")
            .map_err(|_| Error::config("PAPERLESS_TOKEN environment variable is required"))?;

        config.auth_token = std::env::var("MCP_AUTH_TOKEN").ok().filter(|t| !t.is_empty());

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            let level = level.to_lowercase();
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(Error::config(format!(
                    "invalid LOG_LEVEL value '{level}': expected one of debug, info, warn, error"
                )));
            }
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env().map_err(Error::config)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ENV_TEST_LOCK;

    fn set_required_env() {
        unsafe {
            std::env::set_var("PAPERLESS_URL", "http://paperless.local:8000");
            std::env::set_var("PAPERLESS_TOKEN", "abcdef123456");
        }
    }

    fn clear_env() {
        unsafe {
            std::env::remove_var("PAPERLESS_URL");
            std::env::remove_var("PAPERLESS_TOKEN");
            std::env::remove_var("MCP_AUTH_TOKEN");
            std::env::remove_var("LOG_LEVEL");
            std::env::remove_var("MCP_TRANSPORT");
        }
    }

    #[test]
    fn test_missing_paperless_url_is_an_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("PAPERLESS_TOKEN", "abcdef123456");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PAPERLESS_URL"));
        clear_env();
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("PAPERLESS_URL", "http://paperless.local:8000");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PAPERLESS_TOKEN"));
        clear_env();
    }

    #[test]
    fn test_from_env_reads_all_settings() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        set_required_env();
        unsafe {
            std::env::set_var("MCP_AUTH_TOKEN", "bearer-secret");
            std::env::set_var("LOG_LEVEL", "debug");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.paperless.url, "http://paperless.local:8000");
        assert_eq!(config.auth_token.as_deref(), Some("bearer-secret"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.transport.is_stdio());
        clear_env();
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        set_required_env();
        unsafe {
            std::env::set_var("LOG_LEVEL", "verbose");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
        clear_env();
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let config = PaperlessConfig {
            url: "http://localhost:8000".to_string(),
            token: "super_secret_token".to_string(),
        };
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_masked_token() {
        let config = PaperlessConfig {
            url: String::new(),
            token: "abcdef123456".to_string(),
        };
        assert_eq!(config.masked_token(), "abcd****");

        let short = PaperlessConfig {
            url: String::new(),
            token: "ab".to_string(),
        };
        assert_eq!(short.masked_token(), "****");
    }
}
