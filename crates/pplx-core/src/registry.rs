//! Static catalog of the tools this gateway exposes.

use crate::error::{CoreError, CoreResult};
use pplx_protocol_adapter::ToolSpec;
use serde_json::{json, Value as JsonValue};
use std::collections::HashSet;

pub const PERPLEXITY_ASK: &str = "perplexity_ask";
pub const PERPLEXITY_RESEARCH: &str = "perplexity_research";
pub const PERPLEXITY_REASON: &str = "perplexity_reason";

/// A named tool bound to one remote model variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
    /// Model identifier sent to the backend; fixed for the lifetime of the tool
    pub backend_operation: String,
}

impl ToolDescriptor {
    /// Descriptor for a tool taking the standard `messages` argument
    pub fn chat<N, D, O>(name: N, description: D, backend_operation: O) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        O: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: messages_schema(),
            backend_operation: backend_operation.into(),
        }
    }

    pub fn to_spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
        }
    }
}

/// JSON Schema shared by every chat tool: a required, ordered `messages` array.
pub fn messages_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "messages": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "role": {
                            "type": "string",
                            "description": "Role of the message (e.g., system, user, assistant)"
                        },
                        "content": {
                            "type": "string",
                            "description": "The content of the message"
                        }
                    },
                    "required": ["role", "content"]
                },
                "description": "Array of conversation messages"
            }
        },
        "required": ["messages"]
    })
}

/// Read-only, ordered tool catalog. Built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Build a registry from descriptors, keeping their order. Names must be unique.
    pub fn new(tools: Vec<ToolDescriptor>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if tool.name.is_empty() {
                return Err(CoreError::Invalid("tool name must not be empty".to_string()));
            }
            if !seen.insert(tool.name.as_str()) {
                return Err(CoreError::Conflict(format!("duplicate tool name: {}", tool.name)));
            }
        }
        Ok(Self { tools })
    }

    /// The Perplexity tool set: ask, research and reason.
    pub fn perplexity() -> CoreResult<Self> {
        Self::new(vec![
            ToolDescriptor::chat(
                PERPLEXITY_ASK,
                "Engages in a conversation using the Sonar API. \
                 Accepts an array of messages (each with a role and content) \
                 and returns a ask completion response from the Perplexity model.",
                "sonar-pro",
            ),
            ToolDescriptor::chat(
                PERPLEXITY_RESEARCH,
                "Performs deep research using the Perplexity API. \
                 Accepts an array of messages (each with a role and content) \
                 and returns a comprehensive research response with citations.",
                "sonar-deep-research",
            ),
            ToolDescriptor::chat(
                PERPLEXITY_REASON,
                "Performs reasoning tasks using the Perplexity API. \
                 Accepts an array of messages (each with a role and content) \
                 and returns a well-reasoned response using the sonar-reasoning-pro model.",
                "sonar-reasoning-pro",
            ),
        ])
    }

    pub fn resolve(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Tools in registration order
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(ToolDescriptor::to_spec).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perplexity_tools_bind_fixed_models_in_order() {
        let registry = ToolRegistry::perplexity().unwrap();
        let pairs: Vec<(&str, &str)> = registry
            .list()
            .iter()
            .map(|t| (t.name.as_str(), t.backend_operation.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (PERPLEXITY_ASK, "sonar-pro"),
                (PERPLEXITY_RESEARCH, "sonar-deep-research"),
                (PERPLEXITY_REASON, "sonar-reasoning-pro"),
            ]
        );
    }

    #[test]
    fn listing_is_stable() {
        let registry = ToolRegistry::perplexity().unwrap();
        assert_eq!(registry.list(), registry.list());
        assert_eq!(registry.specs(), registry.specs());
    }

    #[test]
    fn resolve_unknown_returns_none() {
        let registry = ToolRegistry::perplexity().unwrap();
        assert!(registry.resolve("perplexity_search").is_none());
        let reason = registry.resolve(PERPLEXITY_REASON).unwrap();
        assert_eq!(reason.backend_operation, "sonar-reasoning-pro");
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = ToolRegistry::new(vec![
            ToolDescriptor::chat("a", "first", "m1"),
            ToolDescriptor::chat("a", "second", "m2"),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let err = ToolRegistry::new(vec![ToolDescriptor::chat("", "nameless", "m")]).unwrap_err();
        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[test]
    fn schema_requires_messages() {
        let schema = messages_schema();
        assert_eq!(schema["required"], json!(["messages"]));
        assert_eq!(schema["properties"]["messages"]["type"], "array");
    }
}
