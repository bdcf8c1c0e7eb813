//! Error types and handling for the MCP server.
//!
//! A unified error type over every layer: gateway, tools, transport.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
///
/// Gateway and tool failures normally surface to clients as error results;
/// this type is for library callers that compose the layers themselves.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the Hex API gateway.
    #[error("Gateway error: {0}")]
    Gateway(#[from] crate::core::gateway::GatewayError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}
