//! Hex run status tool.

use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::models::RunInfo;
use crate::core::gateway::{ApiClient, ApiRequest, request_as};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, path_segment, structured_result};

/// Parameters identifying a single run.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunRefParams {
    #[schemars(description = "ID of the Hex project")]
    pub project_id: String,

    #[schemars(description = "ID of the run, as returned by hex_run_project")]
    pub run_id: String,
}

impl RunRefParams {
    /// Endpoint of the run, after checking both identifiers.
    pub(super) fn endpoint(&self) -> Result<String, ToolError> {
        let project_id = path_segment("project_id", &self.project_id)?;
        let run_id = path_segment("run_id", &self.run_id)?;
        Ok(format!("/projects/{}/runs/{}", project_id, run_id))
    }
}

/// Hex run status tool.
pub struct GetRunStatusTool;

impl GetRunStatusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_get_run_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the status of a Hex project run: PENDING, RUNNING, COMPLETED, ERRORED, KILLED or UNABLE_TO_ALLOCATE_KERNEL, with start/end times and duration.";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        build_tool::<RunRefParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project_id = %params.project_id, run_id = %params.run_id))]
    pub async fn execute(
        client: &dyn ApiClient,
        params: RunRefParams,
    ) -> Result<CallToolResult, ToolError> {
        let endpoint = params.endpoint()?;
        info!("Fetching Hex run status");

        let run: RunInfo = request_as(client, ApiRequest::get(endpoint))
            .await?
            .into_result()?;

        structured_result(run.details(), &run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::testing::StubClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_run_status() {
        let client = StubClient::new();
        client.push_success(json!({
            "projectId": "p1",
            "runId": "r1",
            "status": "COMPLETED",
            "elapsedTime": 4200
        }));

        let params = RunRefParams {
            project_id: "p1".to_string(),
            run_id: "r1".to_string(),
        };
        let result = GetRunStatusTool::execute(&client, params).await.unwrap();

        assert_eq!(result.structured_content.unwrap()["status"], "COMPLETED");
        assert_eq!(client.requests()[0].endpoint, "/projects/p1/runs/r1");
    }

    #[tokio::test]
    async fn test_invalid_run_id_makes_no_request() {
        let client = StubClient::new();
        let params = RunRefParams {
            project_id: "p1".to_string(),
            run_id: " ".to_string(),
        };

        let err = GetRunStatusTool::execute(&client, params).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { ref field, .. } if field == "run_id"));
        assert_eq!(client.call_count(), 0);
    }
}
