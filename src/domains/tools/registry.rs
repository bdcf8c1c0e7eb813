//! Tool Registry - composition and dispatch for all tool groups.
//!
//! This module provides:
//! - A flat name index over the registered groups, built once
//! - Tool metadata for listing
//! - Dispatch that always answers with a `CallToolResult`

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{debug, error, info, instrument};

use super::definitions::common::error_result;
use super::definitions::{ProjectTools, RunTools, WorkspaceTools};
use super::error::ToolError;
use super::handlers::ToolGroup;
use crate::core::gateway::{ApiClient, GatewayError};

/// Tool registry - routes tool calls to the group that owns them.
pub struct ToolRegistry {
    groups: Vec<Arc<dyn ToolGroup>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Compose `groups` in order. Fails if two groups declare the same tool.
    pub fn new(groups: Vec<Arc<dyn ToolGroup>>) -> Result<Self, ToolError> {
        let mut index = HashMap::new();

        for (position, group) in groups.iter().enumerate() {
            for tool in group.definitions() {
                let name = tool.name.to_string();
                if let Some(&first) = index.get(&name) {
                    let first: &Arc<dyn ToolGroup> = &groups[first];
                    return Err(ToolError::DuplicateTool {
                        name,
                        first: first.name().to_string(),
                        second: group.name().to_string(),
                    });
                }
                index.insert(name, position);
            }
        }

        info!(
            groups = groups.len(),
            tools = index.len(),
            "Tool registry ready"
        );
        Ok(Self { groups, index })
    }

    /// The Hex tool set: projects, then runs, then workspace.
    pub fn with_default_groups(client: Arc<dyn ApiClient>) -> Result<Self, ToolError> {
        Self::new(vec![
            Arc::new(ProjectTools::new(client.clone())),
            Arc::new(RunTools::new(client.clone())),
            Arc::new(WorkspaceTools::new(client)),
        ])
    }

    /// Get all tool names, in listing order.
    pub fn tool_names(&self) -> Vec<String> {
        self.list_tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Concatenation of every group's definitions, in group order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.groups
            .iter()
            .flat_map(|group| group.definitions())
            .collect()
    }

    /// Route a call, returning failures as `ToolError`.
    pub async fn try_dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let group = self
            .index
            .get(name)
            .map(|&position| &self.groups[position])
            .filter(|group| group.can_handle(name))
            .ok_or_else(|| ToolError::unknown_tool(name))?;

        debug!(group = group.name(), "Routing tool call");
        group.invoke(name, arguments).await
    }

    /// Route a call. Never fails: every error, including a panic inside a
    /// handler, comes back as an `isError` result carrying the message.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let call = self.try_dispatch(name, arguments.unwrap_or_default());

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                if matches!(err, ToolError::Gateway(GatewayError::Unauthorized)) {
                    error!("Hex API token rejected");
                }
                error_result(&err.to_string())
            }
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(panic = %detail, "Tool handler panicked");
                let err = ToolError::internal(format!("tool '{}' failed unexpectedly", name));
                error_result(&err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::testing::StubClient;
    use crate::domains::tools::definitions::common::{build_tool, success_result};
    use async_trait::async_trait;
    use rmcp::model::RawContent;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::{Value, json};

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[derive(Deserialize, JsonSchema)]
    struct NoParams {}

    /// Single-tool group used to exercise composition rules.
    struct FixedGroup {
        name: &'static str,
        tool: &'static str,
        panics: bool,
    }

    #[async_trait]
    impl ToolGroup for FixedGroup {
        fn name(&self) -> &'static str {
            self.name
        }

        fn definitions(&self) -> Vec<Tool> {
            vec![build_tool::<NoParams>(self.tool, "fixed test tool")]
        }

        fn can_handle(&self, tool: &str) -> bool {
            tool == self.tool
        }

        async fn invoke(&self, _tool: &str, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
            if self.panics {
                panic!("handler exploded");
            }
            Ok(success_result(format!("handled by {}", self.name)))
        }
    }

    fn fixed(name: &'static str, tool: &'static str, panics: bool) -> Arc<dyn ToolGroup> {
        Arc::new(FixedGroup { name, tool, panics })
    }

    #[test]
    fn test_default_tool_catalog() {
        let registry = ToolRegistry::with_default_groups(Arc::new(StubClient::new())).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec![
                "hex_list_projects",
                "hex_get_project",
                "hex_run_project",
                "hex_get_run_status",
                "hex_list_runs",
                "hex_cancel_run",
                "hex_list_users",
                "hex_list_collections",
            ]
        );

        for tool in registry.list_tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(tool.input_schema.get("type"), Some(&json!("object")));
        }
    }

    #[test]
    fn test_groups_handle_exactly_their_definitions() {
        let client: Arc<dyn ApiClient> = Arc::new(StubClient::new());
        let groups: Vec<Arc<dyn ToolGroup>> = vec![
            Arc::new(ProjectTools::new(client.clone())),
            Arc::new(RunTools::new(client.clone())),
            Arc::new(WorkspaceTools::new(client)),
        ];

        for group in &groups {
            for tool in group.definitions() {
                assert!(group.can_handle(&tool.name), "{} not handled", tool.name);
            }
        }
        assert!(!groups[0].can_handle("hex_run_project"));
        assert!(!groups[1].can_handle("hex_list_projects"));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = ToolRegistry::new(vec![
            fixed("alpha", "shared_tool", false),
            fixed("beta", "shared_tool", false),
        ]);

        match result {
            Err(ToolError::DuplicateTool { name, first, second }) => {
                assert_eq!(name, "shared_tool");
                assert_eq!(first, "alpha");
                assert_eq!(second, "beta");
            }
            Err(other) => panic!("expected DuplicateTool, got {other:?}"),
            Ok(_) => panic!("expected DuplicateTool, got a registry"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_owning_group() {
        let registry = ToolRegistry::new(vec![
            fixed("alpha", "tool_a", false),
            fixed("beta", "tool_b", false),
        ])
        .unwrap();

        let result = registry.dispatch("tool_b", None).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "handled by beta");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error_result() {
        let registry = ToolRegistry::with_default_groups(Arc::new(StubClient::new())).unwrap();

        let result = registry.dispatch("hex_nonexistent", args(json!({}))).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Unknown tool: hex_nonexistent");

        let err = registry
            .try_dispatch("hex_nonexistent", JsonObject::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "hex_nonexistent"));
    }

    #[tokio::test]
    async fn test_invalid_argument_makes_no_gateway_call() {
        let client = Arc::new(StubClient::new());
        let registry = ToolRegistry::with_default_groups(client.clone()).unwrap();

        let result = registry
            .dispatch("hex_get_project", args(json!({ "project_id": 42 })))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("project_id"));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_arguments_are_reported() {
        let client = Arc::new(StubClient::new());
        let registry = ToolRegistry::with_default_groups(client.clone()).unwrap();

        let result = registry.dispatch("hex_get_run_status", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Invalid argument 'project_id': required argument is missing"
        );
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_errors_become_error_results() {
        let client = Arc::new(StubClient::new());
        client.push_error(GatewayError::RateLimited);
        let registry = ToolRegistry::with_default_groups(client.clone()).unwrap();

        let result = registry.dispatch("hex_list_projects", None).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("60 requests per minute"));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_end_to_end_with_stub() {
        let client = Arc::new(StubClient::new());
        client.push_success(json!({
            "values": [{ "id": "p1", "title": "Revenue" }],
            "pagination": { "hasMore": false }
        }));
        let registry = ToolRegistry::with_default_groups(client.clone()).unwrap();

        let result = registry
            .dispatch("hex_list_projects", args(json!({ "limit": 5 })))
            .await;

        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).contains("Revenue (ID: p1)"));
        assert_eq!(
            client.requests()[0].query,
            vec![("limit".to_string(), "5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_panicking_handler_is_contained() {
        let registry = ToolRegistry::new(vec![fixed("broken", "boom", true)]).unwrap();

        let result = registry.dispatch("boom", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "Internal error: tool 'boom' failed unexpectedly"
        );

        // The registry is still usable afterwards.
        let again = registry.dispatch("boom", None).await;
        assert_eq!(again.is_error, Some(true));
    }
}
