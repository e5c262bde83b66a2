//! Perplexity MCP (Model Context Protocol) server
//!
//! Binds the shared dispatcher to a single MCP client over stdio, and provides
//! the JSON-RPC envelope types the HTTP transport reuses.

pub mod app_state;
pub mod error;
pub mod jsonrpc;
pub mod mcp;
pub mod server_rmcp;

// Re-export key types
pub use app_state::AppState;
pub use error::{McpError, McpResult};
pub use server_rmcp::{serve_stdio, PerplexityMcpServer};
