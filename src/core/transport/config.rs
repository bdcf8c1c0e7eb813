//! Transport selection.
//!
//! `MCP_TRANSPORT` picks the transport (`stdio` unless set to `http`).
//! The HTTP endpoint reads `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH`
//! and `MCP_HTTP_CORS`.

use serde::{Deserialize, Serialize};

/// Which transport serves the MCP session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// The client spawns the server and talks over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// Listener settings for the HTTP transport.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Route of the JSON-RPC endpoint.
    pub rpc_path: String,
    /// Allow any origin, for browser-based clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read `MCP_HTTP_*`, keeping defaults for missing or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            host: var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port: var("MCP_HTTP_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            rpc_path: var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path),
            enable_cors: var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                .unwrap_or(defaults.enable_cors),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

impl TransportConfig {
    /// HTTP transport on `host:port` with the default path and CORS on.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Select the transport from `MCP_TRANSPORT`.
    pub fn from_env() -> Self {
        let requested = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        #[cfg(feature = "http")]
        if requested == "http" {
            return Self::Http(HttpConfig::from_env());
        }

        let _ = requested;
        Self::default()
    }

    /// Human-readable summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

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
