//! Gateway error types.

use serde_json::{Map, Value};
use thiserror::Error;

/// Requests per minute the Hex API allows for a single token.
pub const RATE_LIMIT_PER_MINUTE: u32 = 60;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors produced while talking to the Hex API.
///
/// None of the messages ever include the configured token.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A request was attempted before `initialize()` succeeded.
    #[error("Hex client is not initialized: the connectivity check has not completed")]
    NotInitialized,

    /// A configuration value is missing or out of range.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The Hex API rejected the token (HTTP 401).
    #[error("Authentication failed: the Hex API rejected the token, check HEX_API_TOKEN")]
    Unauthorized,

    /// The Hex API throttled the request (HTTP 429).
    #[error(
        "Rate limit exceeded: the Hex API allows {} requests per minute, wait before retrying",
        RATE_LIMIT_PER_MINUTE
    )]
    RateLimited,

    /// The Hex API failed on its side (HTTP 5xx).
    #[error("Hex API server error (HTTP {status}), try again later")]
    ServerError {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The configured timeout.
        timeout_ms: u64,
    },

    /// Connection failure, undecodable body or any other transport fault.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A well-formed error body returned by the Hex API.
    #[error("Hex API error [{code}]: {message}")]
    Api {
        /// Service-defined error code.
        code: String,
        /// Service-defined message.
        message: String,
        /// Optional extra fields sent with the error.
        details: Option<Map<String, Value>>,
    },

    /// The server broke the pagination contract.
    #[error("Pagination protocol violation: {0}")]
    ProtocolViolation(String),

    /// The startup probe failed; wraps the classified cause.
    #[error("Hex API initialization failed: {source}")]
    Initialization {
        #[source]
        source: Box<GatewayError>,
    },
}

impl GatewayError {
    /// Create a configuration error.
    pub fn config_invalid(msg: impl Into<String>) -> Self {
        Self::ConfigInvalid(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a pagination protocol violation.
    pub fn protocol_violation(msg: impl Into<String>) -> Self {
        Self::ProtocolViolation(msg.into())
    }

    /// Wrap a probe failure.
    pub fn initialization(source: GatewayError) -> Self {
        Self::Initialization {
            source: Box::new(source),
        }
    }

    /// Whether this failure should abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigInvalid(_) | Self::NotInitialized | Self::Initialization { .. }
        )
    }
}
