//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` selects the transport (`stdio` or `http`); any other
    /// value is a configuration error rather than a silent fallback.
    pub fn from_env() -> Result<Self, String> {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            "" | "stdio" => {
                #[cfg(feature = "stdio")]
                {
                    Ok(Self::Stdio)
                }
                #[cfg(not(feature = "stdio"))]
                {
                    Err("stdio transport requested but the 'stdio' feature is disabled".into())
                }
            }
            "http" => {
                #[cfg(feature = "http")]
                {
                    let port = match std::env::var("MCP_HTTP_PORT") {
                        Ok(raw) => raw.parse().map_err(|_| {
                            format!("invalid MCP_HTTP_PORT value '{raw}': expected a port number")
                        })?,
                        Err(_) => 8080,
                    };
                    let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
                    let rpc_path =
                        std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
                    let enable_cors = std::env::var("MCP_HTTP_CORS")
                        .map(|v| v.to_lowercase() != "false" && v != "0")
                        .unwrap_or(true);
                    Ok(Self::Http(HttpConfig {
                        port,
                        host,
                        rpc_path,
                        enable_cors,
                    }))
                }
                #[cfg(not(feature = "http"))]
                {
                    Err("http transport requested but the 'http' feature is disabled".into())
                }
            }
            other => Err(format!(
                "invalid MCP_TRANSPORT value '{other}': expected 'stdio' or 'http'"
            )),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}
