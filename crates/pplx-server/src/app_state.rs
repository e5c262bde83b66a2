//! State shared by the HTTP handlers

use crate::broadcast::Broadcaster;
use pplx_mcp::AppState;

#[derive(Clone)]
pub struct HttpState {
    pub app: AppState,
    pub broadcaster: Broadcaster,
    /// Reported by `/health`
    pub port: u16,
}

impl HttpState {
    pub fn new(app: AppState, port: u16) -> Self {
        Self { app, broadcaster: Broadcaster::new(), port }
    }
}
