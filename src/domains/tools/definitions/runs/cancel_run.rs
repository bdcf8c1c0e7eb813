//! Hex run cancellation tool.

use rmcp::model::{CallToolResult, Tool};
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::get_run_status::RunRefParams;
use crate::core::gateway::{ApiClient, ApiRequest};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, structured_result};

/// Hex run cancellation tool.
pub struct CancelRunTool;

impl CancelRunTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_cancel_run";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Cancel a pending or running Hex project run. Has no effect on runs that already finished.";

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
        info!("Cancelling Hex run");

        // The API answers 204 with an empty body.
        let _: Value = client
            .send(ApiRequest::delete(endpoint))
            .await?
            .into_result()?;

        structured_result(
            format!(
                "Cancellation requested for run {} of project {}.",
                params.run_id.trim(),
                params.project_id.trim()
            ),
            &json!({
                "project_id": params.project_id.trim(),
                "run_id": params.run_id.trim(),
                "cancelled": true
            }),
        )
    }
}
