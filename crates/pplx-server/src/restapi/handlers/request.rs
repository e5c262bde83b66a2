//! Generic `{method, params, id}` request endpoint

use crate::{dto::SentResponse, HttpState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pplx_mcp::{
    jsonrpc::{error_response, success_response, JsonRpcError, JsonRpcRequest, RequestId},
    mcp::{
        tools_call_result, tools_list_result, ToolsCallParams, METHOD_TOOLS_CALL,
        METHOD_TOOLS_LIST,
    },
};
use pplx_protocol_adapter::{InvokeRequest, ToolCatalog};
use serde_json::json;
use tracing::warn;

/// POST /mcp/request
pub async fn handle_request(
    State(state): State<HttpState>,
    payload: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Malformed /mcp/request body: {}", rejection);
            let error = JsonRpcError::parse_error()
                .with_data(json!({"message": rejection.body_text()}));
            return reject(&state, Some(RequestId::fallback()), error);
        }
    };
    let id = Some(RequestId::or_fallback(request.id));

    let result = match request.method.as_str() {
        METHOD_TOOLS_LIST => tools_list_result(&state.app.dispatcher.list_tools()),
        METHOD_TOOLS_CALL => {
            let params = request.params.unwrap_or_else(|| json!({}));
            let params: ToolsCallParams = match serde_json::from_value(params) {
                Ok(params) => params,
                Err(e) => {
                    let error = JsonRpcError::invalid_params()
                        .with_data(json!({"message": e.to_string()}));
                    return reject(&state, id, error);
                }
            };
            let result = state.app.dispatcher.dispatch(InvokeRequest::from(params)).await;
            tools_call_result(&result)
        }
        other => {
            warn!("Unknown method on /mcp/request: {}", other);
            let error = JsonRpcError::method_not_found().with_data(json!({"method": other}));
            return reject(&state, id, error);
        }
    };

    let response = success_response(id, result);
    state.broadcaster.broadcast(&response);
    (StatusCode::OK, Json(SentResponse::sent(response))).into_response()
}

fn reject(state: &HttpState, id: Option<RequestId>, error: JsonRpcError) -> Response {
    let response = error_response(id, error);
    state.broadcaster.broadcast(&response);
    (StatusCode::BAD_REQUEST, Json(SentResponse::failed(response))).into_response()
}
