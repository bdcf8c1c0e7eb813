//! Project run tools: trigger, poll, list and cancel.

mod cancel_run;
mod get_run_status;
mod list_runs;
pub mod models;
mod run_project;

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

pub use cancel_run::CancelRunTool;
pub use get_run_status::{GetRunStatusTool, RunRefParams};
pub use list_runs::{ListRunsParams, ListRunsTool};
pub use run_project::{RunProjectParams, RunProjectTool};

use crate::core::gateway::ApiClient;
use crate::domains::tools::{ToolError, ToolGroup, parse_arguments};

/// Tools operating on project runs.
pub struct RunTools {
    client: Arc<dyn ApiClient>,
}

impl RunTools {
    pub const GROUP: &'static str = "runs";

    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolGroup for RunTools {
    fn name(&self) -> &'static str {
        Self::GROUP
    }

    fn definitions(&self) -> Vec<Tool> {
        vec![
            RunProjectTool::to_tool(),
            GetRunStatusTool::to_tool(),
            ListRunsTool::to_tool(),
            CancelRunTool::to_tool(),
        ]
    }

    fn can_handle(&self, tool: &str) -> bool {
        matches!(
            tool,
            RunProjectTool::NAME | GetRunStatusTool::NAME | ListRunsTool::NAME | CancelRunTool::NAME
        )
    }

    async fn invoke(&self, tool: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let client = self.client.as_ref();
        match tool {
            RunProjectTool::NAME => RunProjectTool::execute(client, parse_arguments(&arguments)?).await,
            GetRunStatusTool::NAME => {
                GetRunStatusTool::execute(client, parse_arguments(&arguments)?).await
            }
            ListRunsTool::NAME => ListRunsTool::execute(client, parse_arguments(&arguments)?).await,
            CancelRunTool::NAME => CancelRunTool::execute(client, parse_arguments(&arguments)?).await,
            other => Err(ToolError::unknown_tool(other)),
        }
    }
}
