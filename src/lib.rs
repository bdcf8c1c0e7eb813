//! Hex MCP Server Library
//!
//! A Model Context Protocol server exposing the Hex analytics platform as
//! tools: projects, runs, workspace users and collections.
//!
//! # Architecture
//!
//! - **core**: configuration, the authenticated Hex API gateway (error
//!   classification and pagination included), the MCP server handler and
//!   the transports
//! - **domains**: tool groups and the registry that dispatches calls to them
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hex_mcp_server::core::{Config, HexGateway, McpServer};
//! use hex_mcp_server::domains::tools::ToolRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let gateway = HexGateway::new(config.hex.clone())?;
//!     gateway.initialize().await?;
//!
//!     let registry = ToolRegistry::with_default_groups(Arc::new(gateway))?;
//!     let server = McpServer::new(config, registry);
//!     // Start a transport...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
