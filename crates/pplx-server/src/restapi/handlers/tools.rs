//! Catalog and synchronous call handlers

use crate::{dto::CallRequest, HttpState};
use axum::{body::Bytes, extract::State, response::Json};
use pplx_mcp::{
    jsonrpc::{success_response, JsonRpcResponse, RequestId},
    mcp::{tools_call_result, tools_list_result},
};
use pplx_protocol_adapter::ToolCatalog;
use tracing::debug;

/// GET /mcp/tools
pub async fn list_tools(State(state): State<HttpState>) -> Json<JsonRpcResponse> {
    let tools = state.app.dispatcher.list_tools();
    Json(success_response(Some(RequestId::fallback()), tools_list_result(&tools)))
}

/// POST /mcp/call
///
/// Failures are reported inside the envelope (`isError: true`) with HTTP 200;
/// the same message is pushed to every event subscriber. The body is read
/// regardless of content type.
pub async fn call_tool(State(state): State<HttpState>, body: Bytes) -> Json<JsonRpcResponse> {
    let (request, id) = CallRequest::from_body(&body).into_parts();
    debug!("HTTP call: {}", request.tool);

    let result = state.app.dispatcher.dispatch(request).await;
    let response = success_response(Some(id), tools_call_result(&result));

    let delivered = state.broadcaster.broadcast(&response);
    debug!("Broadcast call result to {} subscribers", delivered);

    Json(response)
}
