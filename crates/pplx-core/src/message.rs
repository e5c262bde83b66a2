use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One conversation turn. `role` is free-form (system, user, assistant, ...).
///
/// Fields beyond `role` and `content` are carried through untouched, so a
/// message reaches the backend exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Message {
    pub fn new<R: Into<String>, C: Into<String>>(role: R, content: C) -> Self {
        Self { role: role.into(), content: content.into(), extra: Map::new() }
    }

    pub fn user<C: Into<String>>(content: C) -> Self {
        Self::new("user", content)
    }
}
