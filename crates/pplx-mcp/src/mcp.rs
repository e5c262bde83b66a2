//! MCP method names and the payload shapes shared by both transports

use pplx_protocol_adapter::{InvokeRequest, InvokeResult, ToolSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SERVER_NAME: &str = "perplexity-ask";

// MCP Method Names
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";

/// `tools/call` parameters: `{name, arguments?}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsCallParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl From<ToolsCallParams> for InvokeRequest {
    fn from(params: ToolsCallParams) -> Self {
        InvokeRequest::new(params.name, params.arguments)
    }
}

/// `tools/list` result payload: `{tools: [...]}`
pub fn tools_list_result(tools: &[ToolSpec]) -> Value {
    serde_json::json!({ "tools": tools })
}

/// `tools/call` result payload: `{content: [...], isError}`
pub fn tools_call_result(result: &InvokeResult) -> Value {
    serde_json::to_value(result.render()).unwrap_or_else(|_| {
        serde_json::json!({
            "content": [{"type": "text", "text": result.display_text()}],
            "isError": result.is_error()
        })
    })
}
