//! Hex project listing tool.
//!
//! Lists projects one page at a time, or follows the cursor chain to return
//! the whole collection when `fetch_all` is set.

use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::models::Project;
use crate::core::gateway::{ApiClient, ApiRequest, collect_all, collect_up_to, fetch_page};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{build_tool, structured_result, validate_limit};

/// Parameters for listing projects.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListProjectsParams {
    /// Projects per page.
    #[schemars(description = "Projects per page (default: 25, max: 100)")]
    pub limit: Option<u32>,

    /// Cursor returned by a previous call.
    #[schemars(description = "Cursor returned by a previous call, to continue listing")]
    pub after: Option<String>,

    #[schemars(description = "Include archived projects")]
    #[serde(default)]
    pub include_archived: bool,

    #[schemars(description = "Include projects in the trash")]
    #[serde(default)]
    pub include_trashed: bool,

    /// Follow every page instead of returning a single one.
    #[schemars(
        description = "Follow every page and return the whole collection (from after, if given)"
    )]
    #[serde(default)]
    pub fetch_all: bool,

    #[schemars(description = "With fetch_all, stop once this many projects were collected")]
    pub max_items: Option<u32>,
}

/// Structured output for project listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListResult {
    pub projects: Vec<Project>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Hex project listing tool.
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hex_list_projects";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List projects in the Hex workspace. Returns project IDs, titles, statuses and a cursor for the next page. Set fetch_all to walk every page (optionally capped with max_items).";

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        build_tool::<ListProjectsParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(fetch_all = params.fetch_all))]
    pub async fn execute(
        client: &dyn ApiClient,
        params: ListProjectsParams,
    ) -> Result<CallToolResult, ToolError> {
        let limit = validate_limit(params.limit);
        info!("Listing Hex projects (page size {})", limit);

        let request = ApiRequest::get("/projects")
            .query("limit", limit)
            .query_opt("includeArchived", params.include_archived.then_some(true))
            .query_opt("includeTrashed", params.include_trashed.then_some(true));

        let (projects, next_cursor) = if params.fetch_all {
            // The walk resumes from `after` when one is given.
            let mut start = params.after.clone();
            let fetch = |cursor: Option<String>| {
                let cursor = cursor.or_else(|| start.take());
                fetch_page::<Project>(client, request.clone(), cursor)
            };
            let projects = match params.max_items {
                Some(max) => collect_up_to(fetch, max as usize).await?,
                None => collect_all(fetch).await?,
            };
            (projects, None)
        } else {
            let page = fetch_page::<Project>(client, request, params.after.clone()).await?;
            let next = if page.has_more { page.next_cursor } else { None };
            (page.items, next)
        };

        let result = ProjectListResult {
            count: projects.len(),
            projects,
            next_cursor,
        };

        structured_result(Self::summary(&result), &result)
    }

    fn summary(result: &ProjectListResult) -> String {
        if result.projects.is_empty() {
            return "No projects found.".to_string();
        }

        let mut out = format!("Found {} project(s):\n", result.count);
        for project in &result.projects {
            out.push_str(&project.summary_line());
            out.push('\n');
        }
        if let Some(cursor) = &result.next_cursor {
            out.push_str(&format!(
                "\nMore projects available. Call again with after=\"{}\" to continue.",
                cursor
            ));
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::testing::StubClient;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_page_reports_cursor() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "p1", "title": "Revenue" }],
            "pagination": { "hasMore": true, "after": "c1" }
        }));

        let params = ListProjectsParams {
            limit: Some(1),
            ..Default::default()
        };
        let result = ListProjectsTool::execute(&client, params).await.unwrap();

        assert_eq!(result.is_error, Some(false));
        let text = text_of(&result);
        assert!(text.contains("Revenue (ID: p1)"));
        assert!(text.contains("after=\"c1\""));
        assert_eq!(result.structured_content.unwrap()["next_cursor"], "c1");

        let requests = client.requests();
        assert_eq!(
            requests[0].query,
            vec![("limit".to_string(), "1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_all_walks_every_page() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "p1" }, { "id": "p2" }],
            "pagination": { "hasMore": true, "after": "c1" }
        }));
        client.push_success(json!({
            "values": [{ "id": "p3" }],
            "pagination": { "hasMore": false }
        }));

        let params = ListProjectsParams {
            fetch_all: true,
            include_archived: true,
            ..Default::default()
        };
        let result = ListProjectsTool::execute(&client, params).await.unwrap();

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["count"], 3);
        assert!(structured.get("next_cursor").is_none());

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("includeArchived".to_string(), "true".to_string()),
                ("after".to_string(), "c1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_all_resumes_from_after() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "p3" }],
            "pagination": { "hasMore": true, "after": "c3" }
        }));
        client.push_success(json!({
            "values": [{ "id": "p4" }],
            "pagination": { "hasMore": false }
        }));

        let params = ListProjectsParams {
            after: Some("c2".to_string()),
            fetch_all: true,
            ..Default::default()
        };
        let result = ListProjectsTool::execute(&client, params).await.unwrap();

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["count"], 2);
        assert_eq!(structured["projects"][0]["id"], "p3");

        let requests = client.requests();
        assert_eq!(
            requests[0].query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("after".to_string(), "c2".to_string()),
            ]
        );
        assert_eq!(requests[1].query[1], ("after".to_string(), "c3".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_all_with_max_items_stops_early() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "p1" }, { "id": "p2" }],
            "pagination": { "hasMore": true, "after": "c1" }
        }));

        let params = ListProjectsParams {
            fetch_all: true,
            max_items: Some(2),
            ..Default::default()
        };
        let result = ListProjectsTool::execute(&client, params).await.unwrap();

        assert_eq!(result.structured_content.unwrap()["count"], 2);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_error_discards_partial_results() {
        let client = StubClient::new();
        client.push_success(json!({
            "values": [{ "id": "p1" }],
            "pagination": { "hasMore": true, "after": "c1" }
        }));
        client.push_api_error("INTERNAL", "page two failed");

        let params = ListProjectsParams {
            fetch_all: true,
            ..Default::default()
        };
        let err = ListProjectsTool::execute(&client, params).await.unwrap_err();

        assert!(err.to_string().contains("page two failed"));
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let client = StubClient::new();
        client.push_success(json!({ "values": [] }));

        let result = ListProjectsTool::execute(&client, ListProjectsParams::default())
            .await
            .unwrap();
        assert_eq!(text_of(&result), "No projects found.");
    }
}
