use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Protocol-agnostic tool specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
}

/// Protocol-agnostic tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub tool: String,
    /// Untyped arguments; decoded against the tool's schema by the dispatcher
    #[serde(default)]
    pub args: Option<JsonValue>,
}

impl InvokeRequest {
    pub fn new<T: Into<String>>(tool: T, args: Option<JsonValue>) -> Self {
        Self { tool: tool.into(), args }
    }
}

/// Outcome of exactly one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeResult {
    Success { text: String },
    Failure { message: String },
}

impl InvokeResult {
    pub fn success<T: Into<String>>(text: T) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure<M: Into<String>>(message: M) -> Self {
        Self::Failure { message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Text shown to the caller: the backend text verbatim, or `Error: <message>`.
    pub fn display_text(&self) -> String {
        match self {
            Self::Success { text } => text.clone(),
            Self::Failure { message } => format!("Error: {}", message),
        }
    }

    /// Wire shape shared by every transport: `{content: [{type, text}], isError}`.
    pub fn render(&self) -> RenderedResult {
        RenderedResult {
            content: vec![ContentItem::text(self.display_text())],
            is_error: self.is_error(),
        }
    }
}

/// Serialized form of an [`InvokeResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResult {
    pub content: Vec<ContentItem>,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ContentItem {
    pub fn text<T: Into<String>>(text: T) -> Self {
        Self { kind: "text".to_string(), text: text.into() }
    }
}
