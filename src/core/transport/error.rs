//! Failures that stop a transport before or during an MCP session.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP listener could not claim its address.
    #[error("Cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake with the client failed.
    #[error("MCP session could not start: {0}")]
    Handshake(String),

    /// The HTTP server stopped with an error.
    #[error("HTTP server failed: {0}")]
    Http(String),

    /// An established session ended abnormally.
    #[error("MCP session ended with an error: {0}")]
    Session(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn handshake(err: impl ToString) -> Self {
        Self::Handshake(err.to_string())
    }

    pub fn http(err: impl ToString) -> Self {
        Self::Http(err.to_string())
    }

    pub fn session(err: impl ToString) -> Self {
        Self::Session(err.to_string())
    }
}
