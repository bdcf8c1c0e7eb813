//! Common utilities shared across Hex tools.
//!
//! This module provides shared functionality like limit clamping, path
//! segment validation, timestamp formatting and result builders.

use chrono::{DateTime, Utc};
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Largest page size the Hex API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamp a requested page size to 1..=100, defaulting to 25.
pub fn validate_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Check that an identifier can be used as a single URL path segment.
pub fn path_segment<'a>(field: &str, value: &'a str) -> Result<&'a str, ToolError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::invalid_argument(field, "must not be empty"));
    }
    if value.contains(['/', '?', '#', '%']) || value.chars().any(char::is_whitespace) {
        return Err(ToolError::invalid_argument(
            field,
            format!("'{}' is not a valid identifier", value),
        ));
    }
    Ok(value)
}

/// Format an optional timestamp for display.
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Build the Tool model (metadata) for a params type.
pub fn build_tool<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result with a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> Result<CallToolResult, ToolError> {
    let structured = serde_json::to_value(data)
        .map_err(|e| ToolError::internal(format!("Failed to serialize result: {}", e)))?;

    let mut result = success_result(summary);
    result.structured_content = Some(structured);
    Ok(result)
}
