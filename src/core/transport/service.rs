//! Runs the MCP server on whichever transport the configuration selects.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Owns the transport choice until [`TransportService::run`] consumes it.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(TransportConfig::from_env())
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Serve `server` until the client disconnects (STDIO) or the listener
    /// stops (HTTP).
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!(
            server = server.name(),
            "Starting transport: {}",
            self.config.description()
        );

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
        }
    }
}
