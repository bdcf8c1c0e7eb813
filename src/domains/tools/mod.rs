//! Tools domain module.
//!
//! Tools are the operations MCP clients call. Each one maps to a Hex API
//! endpoint.
//!
//! ## Architecture
//!
//! - `definitions/` - tool implementations, one file per tool, one directory per group
//! - `handlers.rs` - the `ToolGroup` contract implemented by each group
//! - `params.rs` - schema-driven argument validation
//! - `registry.rs` - composition of groups and uniform dispatch
//! - `error.rs` - tool-level error taxonomy
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in the matching `definitions/<group>/` directory with
//!    a params struct, `NAME`, `DESCRIPTION`, `to_tool()` and `execute()`
//! 2. List it in the group's `definitions()`, `can_handle()` and `invoke()`
//!
//! Tool names must be unique across groups; the registry refuses to start
//! otherwise.

pub mod definitions;
mod error;
mod handlers;
mod params;
mod registry;

pub use error::ToolError;
pub use handlers::ToolGroup;
pub use params::{parse_arguments, validate_arguments};
pub use registry::ToolRegistry;
