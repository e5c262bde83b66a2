//! HTTP request and response bodies

use pplx_mcp::jsonrpc::{JsonRpcResponse, RequestId};
use pplx_protocol_adapter::InvokeRequest;
use serde::Serialize;
use serde_json::Value;

/// POST /mcp/call body
///
/// Decoded leniently: every body, well-formed or not, becomes one dispatch.
/// A body that is not a JSON object reads as `{}`.
#[derive(Debug, Default)]
pub struct CallRequest {
    pub name: String,
    pub arguments: Option<Value>,
    pub id: Option<RequestId>,
}

impl CallRequest {
    pub fn from_body(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(mut body)) => Self {
                name: match body.remove("name") {
                    Some(Value::String(name)) => name,
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                },
                arguments: body.remove("arguments"),
                id: Some(RequestId::from_value(body.get("id"))),
            },
            _ => Self::default(),
        }
    }

    pub fn into_parts(self) -> (InvokeRequest, RequestId) {
        (InvokeRequest::new(self.name, self.arguments), RequestId::or_fallback(self.id))
    }
}

/// POST /mcp/request reply
#[derive(Debug, Serialize)]
pub struct SentResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonRpcResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcResponse>,
}

impl SentResponse {
    pub fn sent(result: JsonRpcResponse) -> Self {
        Self { status: "sent", result: Some(result), error: None }
    }

    pub fn failed(error: JsonRpcResponse) -> Self {
        Self { status: "error", result: None, error: Some(error) }
    }
}

/// GET /health reply
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub transport: &'static str,
    pub port: u16,
}
