//! Project tools.
//!
//! - `list_projects`: page through (or walk) the workspace's projects
//! - `get_project`: details of one project

pub mod get_project;
pub mod list_projects;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};

use crate::core::gateway::ApiClient;
use crate::domains::tools::{ToolError, ToolGroup, parse_arguments};

pub use get_project::{GetProjectParams, GetProjectTool};
pub use list_projects::{ListProjectsParams, ListProjectsTool};
pub use models::Project;

/// Handler group for project tools.
pub struct ProjectTools {
    client: Arc<dyn ApiClient>,
}

impl ProjectTools {
    pub const GROUP: &'static str = "projects";

    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolGroup for ProjectTools {
    fn name(&self) -> &'static str {
        Self::GROUP
    }

    fn definitions(&self) -> Vec<Tool> {
        vec![ListProjectsTool::to_tool(), GetProjectTool::to_tool()]
    }

    fn can_handle(&self, tool: &str) -> bool {
        matches!(tool, ListProjectsTool::NAME | GetProjectTool::NAME)
    }

    async fn invoke(&self, tool: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let client = self.client.as_ref();
        match tool {
            ListProjectsTool::NAME => {
                ListProjectsTool::execute(client, parse_arguments(&arguments)?).await
            }
            GetProjectTool::NAME => GetProjectTool::execute(client, parse_arguments(&arguments)?).await,
            _ => Err(ToolError::unknown_tool(tool)),
        }
    }
}
