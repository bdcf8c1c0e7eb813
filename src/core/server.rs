//! MCP Server implementation and lifecycle management.
//!
//! The handler exposes the Hex tool catalog over MCP. All tool traffic goes
//! through the [`ToolRegistry`], so listing and dispatch behave the same on
//! every transport.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Tools for the Hex analytics platform: list and inspect projects, \
trigger runs and follow their status, and browse workspace users and collections. \
Failed calls come back with isError set and a message explaining the cause.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Composed tool groups.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server serving the tools in `registry`.
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Usage notes sent to clients on initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Never fails: tool errors are reported inside the result.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        self.registry.dispatch(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool");
        Ok(self.registry.dispatch(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::testing::StubClient;

    fn server() -> McpServer {
        let registry = ToolRegistry::with_default_groups(Arc::new(StubClient::new())).unwrap();
        McpServer::new(Config::default(), registry)
    }

    #[test]
    fn test_server_advertises_tools_only() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_list_tools_json_shape() {
        let tools = server().list_tools();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[0]["name"], "hex_list_projects");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_call_tool_reports_unknown_tool() {
        let result = server().call_tool("hex_nonexistent", None).await;
        assert_eq!(result.is_error, Some(true));
    }
}
