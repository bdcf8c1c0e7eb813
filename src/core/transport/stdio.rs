//! STDIO transport implementation.
//!
//! The client spawns the server and speaks MCP over stdin/stdout, so all
//! logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            tools = server.registry().tool_names().len(),
            "Ready - communicating via stdin/stdout"
        );

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(TransportError::handshake)?;

        let reason = service
            .waiting()
            .await
            .map_err(TransportError::session)?;

        info!("STDIO session ended: {:?}", reason);
        Ok(())
    }
}
