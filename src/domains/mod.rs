//! Domains module containing the MCP-facing business logic.
//!
//! The server exposes tools only; each tool wraps one Hex API operation.

pub mod tools;
