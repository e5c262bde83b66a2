//! Perplexity gateway HTTP server
//!
//! Serves the tool catalog and synchronous tool calls over HTTP, and fans every
//! call result out to all `/mcp/events` subscribers.

pub mod app_state;
pub mod broadcast;
pub mod dto;
pub mod error;
pub mod restapi;

// Re-export key types
pub use app_state::HttpState;
pub use broadcast::{Broadcaster, Subscription};
pub use error::{ServerError, ServerResult};
pub use pplx_mcp::AppState;
pub use restapi::create_router;

/// Where the HTTP transport listens
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000 }
    }
}

impl HttpConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Serve the HTTP/SSE transport until the listener fails
pub async fn serve_http(app_state: AppState, config: HttpConfig) -> ServerResult<()> {
    restapi::serve(HttpState::new(app_state, config.port), &config.addr()).await
}

// MCP delegation, so callers only need this crate to run either transport
pub async fn serve_stdio(app_state: AppState) -> ServerResult<()> {
    pplx_mcp::serve_stdio(app_state).await.map_err(ServerError::from)
}
