//! Transport layer for the MCP server.
//!
//! - **STDIO**: standard input/output, the usual way MCP clients launch the
//!   server - feature: `stdio`
//! - **HTTP**: JSON-RPC over POST for clients that cannot spawn processes -
//!   feature: `http`
//!
//! Both delegate every tool call to the same [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
