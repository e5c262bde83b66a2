//! Health check handlers

use crate::{dto::HealthResponse, HttpState};
use axum::{extract::State, response::Json};

/// GET /health
pub async fn health_check(State(state): State<HttpState>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", transport: "http", port: state.port })
}
