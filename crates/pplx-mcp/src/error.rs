//! Error handling for the MCP transport

use thiserror::Error;

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can stop the MCP transport. Per-invocation failures never
/// surface here; they travel inside the result envelope.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Tool catalog error: {0}")]
    Catalog(#[from] pplx_core::CoreError),
}
