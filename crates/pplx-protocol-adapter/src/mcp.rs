//! Helpers to map protocol-agnostic DTOs to the official MCP Rust SDK types.

use crate::dto::{InvokeResult, ToolSpec};
use rmcp::model as m;
use std::sync::Arc;

fn to_json_object(val: &serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match val {
        serde_json::Value::Object(map) => map.clone(),
        _ => {
            // Wrap as minimal object schema if the schema is not an object
            let mut obj = serde_json::Map::new();
            obj.insert("type".into(), serde_json::Value::String("object".into()));
            obj
        }
    }
}

pub fn to_mcp_tool(spec: &ToolSpec) -> m::Tool {
    m::Tool::new(
        spec.name.clone(),
        spec.description.clone(),
        Arc::new(to_json_object(&spec.input_schema)),
    )
}

pub fn to_mcp_call_result(res: &InvokeResult) -> m::CallToolResult {
    let content = vec![m::Content::text(res.display_text())];
    if res.is_error() {
        m::CallToolResult::error(content)
    } else {
        m::CallToolResult::success(content)
    }
}
