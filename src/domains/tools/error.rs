//! Tool-specific error types.

use thiserror::Error;

use crate::core::gateway::GatewayError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No registered group handles the requested tool.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A caller-supplied argument is missing or has the wrong type.
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Two groups claim the same tool name.
    #[error("Tool '{name}' is registered by both '{first}' and '{second}'")]
    DuplicateTool {
        name: String,
        first: String,
        second: String,
    },

    /// The Hex API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
