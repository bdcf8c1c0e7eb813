//! HTTP transport implementation.
//!
//! JSON-RPC over POST, for clients that talk to the server over the network
//! instead of spawning it. Only the tool surface of MCP is served.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rmcp::model::CallToolRequestParam;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// MCP protocol revision answered to `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, -32601, format!("Method not found: {}", method))
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    /// Set once the client confirms with `notifications/initialized`.
    client_ready: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(server: McpServer) -> Self {
        Self {
            server,
            client_ready: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .with_state(AppState::new(server));

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Run the HTTP transport until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            cors = self.config.enable_cors,
            "Ready - listening on {} (JSON-RPC at POST {}, health at GET /health)",
            addr,
            self.config.rpc_path
        );

        axum::serve(listener, app)
            .await
            .map_err(TransportError::http)
    }
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "server": state.server.name(),
        "version": state.server.version(),
        "tools": state.server.registry().tool_names().len(),
        "clientReady": state.client_ready.load(Ordering::Acquire),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    tracing::Span::current().record("method", request.method.as_str());
    debug!("Received JSON-RPC request");

    if request.method.starts_with("notifications/") {
        handle_notification(&state, &request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let response = process_request(&state, request).await;
    (StatusCode::OK, Json(response)).into_response()
}

/// Process a JSON-RPC request and return the response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(state, request.id),
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => handle_tools_list(state, request.id),
        "tools/call" => handle_tools_call(state, request).await,
        other => {
            warn!("Unknown method: {}", other);
            JsonRpcResponse::method_not_found(request.id, other)
        }
    }
}

fn handle_initialize(state: &AppState, id: Option<Value>) -> JsonRpcResponse {
    info!("Processing initialize request");

    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": state.server.name(),
                "version": state.server.version()
            },
            "instructions": state.server.instructions()
        }),
    )
}

fn handle_tools_list(state: &AppState, id: Option<Value>) -> JsonRpcResponse {
    JsonRpcResponse::success(id, json!({ "tools": state.server.list_tools() }))
}

/// Tool failures are results with `isError`, never JSON-RPC errors.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = request.params else {
        return JsonRpcResponse::invalid_params(request.id, "Missing params");
    };

    let call: CallToolRequestParam = match serde_json::from_value(params) {
        Ok(call) => call,
        Err(e) => {
            return JsonRpcResponse::invalid_params(request.id, format!("Invalid tools/call params: {}", e));
        }
    };

    info!(tool = %call.name, "Processing tools/call request");
    let result = state.server.call_tool(&call.name, call.arguments).await;

    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(request.id, value),
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

fn handle_notification(state: &AppState, method: &str) {
    match method {
        "notifications/initialized" => {
            state.client_ready.store(true, Ordering::Release);
            info!("Client sent initialized notification");
        }
        other => debug!("Ignoring notification: {}", other),
    }
}
