//! Router for the HTTP transport

use crate::HttpState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with CORS open to any origin
pub fn create_router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(super::handlers::health::health_check))
        .route("/mcp/events", get(super::handlers::events::stream_events))
        .route("/mcp/tools", get(super::handlers::tools::list_tools))
        .route("/mcp/call", post(super::handlers::tools::call_tool))
        .route("/mcp/request", post(super::handlers::request::handle_request))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
