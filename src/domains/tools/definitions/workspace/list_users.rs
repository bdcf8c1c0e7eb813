//! Workspace member listing tool.

use rmcp::model::{CallToolResult, Tool};
use tracing::{info, instrument};

use super::listing::{ListParams, list};
use super::models::User;
use crate::core::gateway::ApiClient;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, structured_result};

/// Workspace member listing tool.
pub struct ListUsersTool;

impl ListUsersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_list_users";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List members of the Hex workspace with their email and role. Set fetch_all to walk every page.";

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
        info!("Listing Hex workspace users");
        let users = list::<User>(client, "/users", &params).await?;
        structured_result(users.summary("users", User::summary_line), &users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::testing::StubClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_users_walks_pages() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "u1", "email": "a@example.com" }],
            "pagination": { "hasMore": true, "after": "c1" }
        }));
        client.push_success(json!({
            "values": [{ "id": "u2", "email": "b@example.com" }],
            "pagination": { "hasMore": false, "after": null }
        }));

        let params = ListParams {
            fetch_all: true,
            ..Default::default()
        };
        let result = ListUsersTool::execute(&client, params).await.unwrap();

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["count"], 2);
        assert_eq!(structured["items"][1]["id"], "u2");
        assert_eq!(client.requests()[0].endpoint, "/users");
    }

    #[tokio::test]
    async fn test_fetch_all_starts_at_after_cursor() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "u7", "email": "g@example.com" }],
            "pagination": { "hasMore": false }
        }));

        let params = ListParams {
            after: Some("c6".to_string()),
            fetch_all: true,
            ..Default::default()
        };
        let result = ListUsersTool::execute(&client, params).await.unwrap();

        assert_eq!(result.structured_content.unwrap()["items"][0]["id"], "u7");
        assert_eq!(
            client.requests()[0].query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("after".to_string(), "c6".to_string()),
            ]
        );
    }
}
