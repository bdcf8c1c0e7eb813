//! Hex run history tool.

use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::models::{RunList, RunStatus};
use crate::core::gateway::{ApiClient, ApiRequest, request_as};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    build_tool, path_segment, structured_result, validate_limit,
};

/// Parameters for listing the runs of a project.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListRunsParams {
    #[schemars(description = "ID of the Hex project")]
    pub project_id: String,

    #[schemars(description = "Runs per page (default: 25, max: 100)")]
    pub limit: Option<u32>,

    #[schemars(description = "Number of runs to skip")]
    pub offset: Option<u32>,

    /// One of [`RunStatus::FILTERS`].
    #[schemars(
        description = "Only return runs in this status: PENDING, RUNNING, ERRORED, COMPLETED, KILLED or UNABLE_TO_ALLOCATE_KERNEL"
    )]
    pub status_filter: Option<String>,
}

/// Hex run history tool.
pub struct ListRunsTool;

impl ListRunsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_list_runs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List recent API-triggered runs of a Hex project, newest first, optionally filtered by status.";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        build_tool::<ListRunsParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project_id = %params.project_id))]
    pub async fn execute(
        client: &dyn ApiClient,
        params: ListRunsParams,
    ) -> Result<CallToolResult, ToolError> {
        let project_id = path_segment("project_id", &params.project_id)?;
        let status_filter = params
            .status_filter
            .as_deref()
            .map(normalize_status_filter)
            .transpose()?;
        let limit = validate_limit(params.limit);
        info!("Listing Hex runs (page size {})", limit);

        let request = ApiRequest::get(format!("/projects/{}/runs", project_id))
            .query("limit", limit)
            .query_opt("offset", params.offset)
            .query_opt("statusFilter", status_filter);

        let list: RunList = request_as(client, request).await?.into_result()?;

        let summary = if list.runs.is_empty() {
            format!("No runs found for project {}.", project_id)
        } else {
            let mut out = format!("Found {} run(s) for project {}:\n", list.runs.len(), project_id);
            for run in &list.runs {
                out.push_str(&run.summary_line());
                out.push('\n');
            }
            if list.next_page.is_some() {
                let next_offset = u32::try_from(list.runs.len())
                    .ok()
                    .and_then(|fetched| params.offset.unwrap_or(0).checked_add(fetched));
                match next_offset {
                    Some(offset) => out.push_str(&format!(
                        "\nMore runs available. Call again with offset={} to continue.",
                        offset
                    )),
                    None => out.push_str("\nMore runs available."),
                }
            }
            out.trim_end().to_string()
        };

        structured_result(summary, &list)
    }
}

fn normalize_status_filter(value: &str) -> Result<&'static str, ToolError> {
    let upper = value.trim().to_ascii_uppercase();
    RunStatus::FILTERS
        .into_iter()
        .find(|status| *status == upper)
        .ok_or_else(|| {
            ToolError::invalid_argument(
                "status_filter",
                format!(
                    "'{}' is not a run status; expected one of {}",
                    value,
                    RunStatus::FILTERS.join(", ")
                ),
            )
        })
}
