//! Application state shared by the MCP transports

use crate::McpResult;
use pplx_core::{BackendConfig, Dispatcher, PerplexityClient, ToolRegistry};
use std::sync::Arc;

/// Shared application state
///
/// Holds the one dispatcher every transport routes through. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher: Arc::new(dispatcher) }
    }

    /// Create AppState backed by the real Perplexity API and the default tool set
    pub fn from_backend_config(config: BackendConfig) -> McpResult<Self> {
        let registry = Arc::new(ToolRegistry::perplexity()?);
        let backend = Arc::new(PerplexityClient::new(config));
        Ok(Self::new(Dispatcher::new(registry, backend)))
    }
}
