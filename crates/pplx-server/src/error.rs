//! Server error types

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that stop the server from starting or running. Per-call failures
/// are returned inside the result envelope instead.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("MCP error: {0}")]
    Mcp(#[from] pplx_mcp::McpError),
}
