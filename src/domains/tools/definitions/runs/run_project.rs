//! Hex project run trigger tool.

use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use super::models::RunLaunch;
use crate::core::gateway::{ApiClient, ApiRequest, request_as};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, path_segment, structured_result};

/// Parameters for triggering a project run.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunProjectParams {
    #[schemars(description = "ID of the Hex project to run")]
    pub project_id: String,

    /// Values for the project's input parameters, keyed by parameter name.
    #[schemars(description = "Input parameter values keyed by parameter name")]
    pub input_params: Option<Map<String, Value>>,

    #[schemars(description = "Validate the run without executing it")]
    #[serde(default)]
    pub dry_run: bool,

    #[schemars(description = "Update the published app with the results of this run")]
    #[serde(default)]
    pub update_published_results: bool,

    #[schemars(description = "Reuse cached SQL results where possible")]
    #[serde(default)]
    pub use_cached_sql_results: bool,
}

impl RunProjectParams {
    fn body(&self) -> Value {
        let mut body = json!({
            "dryRun": self.dry_run,
            "updatePublishedResults": self.update_published_results,
            "useCachedSqlResults": self.use_cached_sql_results,
        });
        if let Some(inputs) = &self.input_params {
            body["inputParams"] = Value::Object(inputs.clone());
        }
        body
    }
}

/// Hex project run trigger tool.
pub struct RunProjectTool;

impl RunProjectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_run_project";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Trigger a run of a published Hex project, optionally with input parameter values. Returns the run ID to poll with hex_get_run_status.";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        build_tool::<RunProjectParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project_id = %params.project_id, dry_run = params.dry_run))]
    pub async fn execute(
        client: &dyn ApiClient,
        params: RunProjectParams,
    ) -> Result<CallToolResult, ToolError> {
        let project_id = path_segment("project_id", &params.project_id)?;
        info!("Triggering Hex project run");

        let request = ApiRequest::post(format!("/projects/{}/runs", project_id), params.body());
        let launch: RunLaunch = request_as(client, request).await?.into_result()?;

        let mut summary = if params.dry_run {
            format!("Dry run accepted for project {}.\nRun ID: {}", launch.project_id, launch.run_id)
        } else {
            format!("Started run of project {}.\nRun ID: {}", launch.project_id, launch.run_id)
        };
        if let Some(url) = &launch.run_url {
            summary.push_str(&format!("\nURL: {}", url));
        }
        summary.push_str("\nUse hex_get_run_status to follow its progress.");

        structured_result(summary, &launch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::HttpMethod;
    use crate::core::gateway::testing::StubClient;

    #[tokio::test]
    async fn test_run_project_posts_body() {
        let client = StubClient::new();
        client.push_success(json!({
            "projectId": "p1",
            "runId": "r1",
            "runUrl": "https://app.hex.tech/app/p1/runs/r1"
        }));

        let mut inputs = Map::new();
        inputs.insert("region".to_string(), json!("EU"));
        let params = RunProjectParams {
            project_id: "p1".to_string(),
            input_params: Some(inputs),
            dry_run: false,
            update_published_results: true,
            use_cached_sql_results: false,
        };

        let result = RunProjectTool::execute(&client, params).await.unwrap();
        assert_eq!(result.structured_content.unwrap()["runId"], "r1");

        let request = &client.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.endpoint, "/projects/p1/runs");
        assert_eq!(
            request.body,
            Some(json!({
                "dryRun": false,
                "updatePublishedResults": true,
                "useCachedSqlResults": false,
                "inputParams": { "region": "EU" }
            }))
        );
    }
}
