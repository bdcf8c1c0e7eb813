//! Workspace tools: members and collections.

mod list_collections;
mod list_users;
mod listing;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

pub use list_collections::ListCollectionsTool;
pub use list_users::ListUsersTool;
pub use listing::{ListParams, Listing};

use crate::core::gateway::ApiClient;
use crate::domains::tools::{ToolError, ToolGroup, parse_arguments};

/// Tools describing the workspace itself.
pub struct WorkspaceTools {
    client: Arc<dyn ApiClient>,
}

impl WorkspaceTools {
    pub const GROUP: &'static str = "workspace";

    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolGroup for WorkspaceTools {
    fn name(&self) -> &'static str {
        Self::GROUP
    }

    fn definitions(&self) -> Vec<Tool> {
        vec![ListUsersTool::to_tool(), ListCollectionsTool::to_tool()]
    }

    fn can_handle(&self, tool: &str) -> bool {
        matches!(tool, ListUsersTool::NAME | ListCollectionsTool::NAME)
    }

    async fn invoke(&self, tool: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let client = self.client.as_ref();
        match tool {
            ListUsersTool::NAME => ListUsersTool::execute(client, parse_arguments(&arguments)?).await,
            ListCollectionsTool::NAME => {
                ListCollectionsTool::execute(client, parse_arguments(&arguments)?).await
            }
            other => Err(ToolError::unknown_tool(other)),
        }
    }
}
