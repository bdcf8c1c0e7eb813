//! Hex project detail tool.

use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::models::Project;
use crate::core::gateway::{ApiClient, ApiRequest, request_as};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, path_segment, structured_result};

/// Parameters for fetching a single project.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProjectParams {
    #[schemars(description = "ID of the Hex project")]
    pub project_id: String,
}

/// Hex project detail tool.
pub struct GetProjectTool;

impl GetProjectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_get_project";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get details of a Hex project by ID: title, description, type, status, owner, categories and edit/publish timestamps.";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        build_tool::<GetProjectParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project_id = %params.project_id))]
    pub async fn execute(
        client: &dyn ApiClient,
        params: GetProjectParams,
    ) -> Result<CallToolResult, ToolError> {
        let project_id = path_segment("project_id", &params.project_id)?;
        info!("Fetching Hex project");

        let project: Project =
            request_as(client, ApiRequest::get(format!("/projects/{}", project_id)))
                .await?
                .into_result()?;

        structured_result(project.details(), &project)
    }
}
