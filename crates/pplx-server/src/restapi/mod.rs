//! HTTP routes for the broadcast transport

pub mod handlers;
pub mod router;

pub use router::create_router;

use crate::{HttpState, ServerError, ServerResult};
use tracing::info;

/// Bind `addr` and serve the router until the server stops
pub async fn serve(state: HttpState, addr: &str) -> ServerResult<()> {
    let port = state.port;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.to_string(), source })?;

    info!("Perplexity MCP Server running on HTTP port {}", port);
    info!("SSE endpoint: http://localhost:{}/mcp/events", port);
    info!("Health check: http://localhost:{}/health", port);
    info!("Tools endpoint: http://localhost:{}/mcp/tools", port);
    info!("Call endpoint: http://localhost:{}/mcp/call", port);
    info!("Request endpoint: http://localhost:{}/mcp/request", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
