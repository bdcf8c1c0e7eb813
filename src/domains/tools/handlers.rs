//! Handler group contract.
//!
//! A group owns a handful of related tools. The registry asks each group,
//! in order, whether it handles a name and hands the call to the first one
//! that does.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

use super::error::ToolError;

/// A set of related tools sharing one Hex API client.
#[async_trait]
pub trait ToolGroup: Send + Sync {
    /// Group name, used in logs and duplicate reports.
    fn name(&self) -> &'static str;

    /// Metadata of every tool in the group, in listing order.
    fn definitions(&self) -> Vec<Tool>;

    /// Whether `tool` belongs to this group.
    fn can_handle(&self, tool: &str) -> bool;

    /// Validate `arguments` and run `tool`.
    async fn invoke(&self, tool: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}
