//! Project collection listing tool.

use rmcp::model::{CallToolResult, Tool};
use tracing::{info, instrument};

use super::listing::{ListParams, list};
use super::models::Collection;
use crate::core::gateway::ApiClient;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, structured_result};

/// Project collection listing tool.
pub struct ListCollectionsTool;

impl ListCollectionsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_list_collections";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List the project collections of the Hex workspace. Set fetch_all to walk every page.";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        build_tool::<ListParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(fetch_all = params.fetch_all))]
    pub async fn execute(
        client: &dyn ApiClient,
        params: ListParams,
    ) -> Result<CallToolResult, ToolError> {
        info!("Listing Hex collections");
        let collections = list::<Collection>(client, "/collections", &params).await?;
        structured_result(
            collections.summary("collections", Collection::summary_line),
            &collections,
        )
    }
}
