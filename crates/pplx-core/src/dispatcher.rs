//! Single entry point shared by every transport: validate, route, normalize.

use crate::backend::CompletionBackend;
use crate::error::DispatchError;
use crate::message::Message;
use crate::registry::{ToolDescriptor, ToolRegistry};
use pplx_protocol_adapter::{InvokeRequest, InvokeResult, ToolCatalog, ToolInvoker, ToolSpec};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

const MESSAGES_NOT_ARRAY: &str = "'messages' must be an array";

/// A request that passed schema checks, bound to its tool.
#[derive(Debug, Clone)]
pub struct ValidatedCall<'a> {
    pub tool: &'a ToolDescriptor,
    pub messages: Vec<Message>,
}

/// Stateless apart from the shared read-only registry; safe to call concurrently.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    backend: Arc<dyn CompletionBackend>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { registry, backend }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one invocation. Always yields exactly one envelope.
    pub async fn dispatch(&self, request: InvokeRequest) -> InvokeResult {
        match self.try_dispatch(&request).await {
            Ok(text) => InvokeResult::success(text),
            Err(e) => {
                warn!("Tool '{}' failed: {}", request.tool, e);
                InvokeResult::failure(e.to_string())
            }
        }
    }

    async fn try_dispatch(&self, request: &InvokeRequest) -> Result<String, DispatchError> {
        let call = self.validate(request)?;
        debug!(
            "Dispatching tool '{}' to model '{}' with {} messages",
            call.tool.name,
            call.tool.backend_operation,
            call.messages.len()
        );
        let text = self.backend.complete(&call.messages, &call.tool.backend_operation).await?;
        Ok(text)
    }

    /// Check arguments, tool name and `messages` shape, in that order.
    pub fn validate(&self, request: &InvokeRequest) -> Result<ValidatedCall<'_>, DispatchError> {
        let args = match request.args.as_ref() {
            Some(args) if !is_empty_container(args) => args,
            _ => return Err(DispatchError::NoArguments),
        };

        let tool = self
            .registry
            .resolve(&request.tool)
            .ok_or_else(|| DispatchError::UnknownTool(request.tool.clone()))?;

        let messages = decode_messages(&tool.name, args)?;
        Ok(ValidatedCall { tool, messages })
    }
}

fn is_empty_container(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn decode_messages(tool: &str, args: &JsonValue) -> Result<Vec<Message>, DispatchError> {
    let items = args.get("messages").and_then(JsonValue::as_array).ok_or_else(|| {
        DispatchError::InvalidArguments {
            tool: tool.to_string(),
            reason: MESSAGES_NOT_ARRAY.to_string(),
        }
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Message>(item.clone()).map_err(|e| {
                DispatchError::InvalidArguments {
                    tool: tool.to_string(),
                    reason: format!(
                        "{} of {{role, content}} objects (element {}: {})",
                        MESSAGES_NOT_ARRAY, index, e
                    ),
                }
            })
        })
        .collect()
}

impl ToolCatalog for Dispatcher {
    fn list_tools(&self) -> Vec<ToolSpec> {
        self.registry.specs()
    }
}

impl ToolInvoker for Dispatcher {
    fn invoke<'a>(
        &'a self,
        req: InvokeRequest,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = InvokeResult> + Send + 'a>> {
        Box::pin(self.dispatch(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::registry::{PERPLEXITY_ASK, PERPLEXITY_REASON, PERPLEXITY_RESEARCH};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    enum Reply {
        Text(&'static str),
        Status(u16, &'static str),
        Malformed,
    }

    struct StubBackend {
        reply: Reply,
        calls: Mutex<Vec<(Vec<Message>, String)>>,
    }

    impl StubBackend {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self { reply, calls: Mutex::new(Vec::new()) })
        }

        fn calls(&self) -> Vec<(Vec<Message>, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(
            &self,
            messages: &[Message],
            model: &str,
        ) -> Result<String, BackendError> {
            self.calls.lock().unwrap().push((messages.to_vec(), model.to_string()));
            match &self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Status(status, body) => Err(BackendError::ApiStatus {
                    status: *status,
                    reason: "Internal Server Error".to_string(),
                    body: body.to_string(),
                }),
                Reply::Malformed => {
                    Err(BackendError::MalformedResponse("expected value".to_string()))
                }
            }
        }
    }

    fn dispatcher(backend: Arc<StubBackend>) -> Dispatcher {
        Dispatcher::new(Arc::new(ToolRegistry::perplexity().unwrap()), backend)
    }

    fn hi() -> JsonValue {
        json!({"messages": [{"role": "user", "content": "hi"}]})
    }

    fn failure_message(result: InvokeResult) -> String {
        match result {
            InvokeResult::Failure { message } => message,
            InvokeResult::Success { text } => panic!("expected failure, got success: {}", text),
        }
    }

    #[tokio::test]
    async fn success_returns_backend_text_verbatim() {
        let backend = StubBackend::new(Reply::Text("hello"));
        let d = dispatcher(backend.clone());

        let result = d.dispatch(InvokeRequest::new(PERPLEXITY_ASK, Some(hi()))).await;

        assert_eq!(result, InvokeResult::success("hello"));
        assert_eq!(backend.calls(), vec![(vec![Message::user("hi")], "sonar-pro".to_string())]);
    }

    #[tokio::test]
    async fn each_tool_uses_its_bound_model() {
        let backend = StubBackend::new(Reply::Text("ok"));
        let d = dispatcher(backend.clone());

        for tool in [PERPLEXITY_ASK, PERPLEXITY_RESEARCH, PERPLEXITY_REASON] {
            d.dispatch(InvokeRequest::new(tool, Some(hi()))).await;
        }

        let models: Vec<String> = backend.calls().into_iter().map(|(_, m)| m).collect();
        assert_eq!(models, vec!["sonar-pro", "sonar-deep-research", "sonar-reasoning-pro"]);
    }

    #[tokio::test]
    async fn message_order_is_preserved() {
        let backend = StubBackend::new(Reply::Text("ok"));
        let d = dispatcher(backend.clone());
        let args = json!({"messages": [
            {"role": "system", "content": "s"},
            {"role": "user", "content": "u1"},
            {"role": "assistant", "content": "a"},
            {"role": "user", "content": "u2"}
        ]});

        d.dispatch(InvokeRequest::new(PERPLEXITY_ASK, Some(args))).await;

        let sent = &backend.calls()[0].0;
        let contents: Vec<&str> = sent.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["s", "u1", "a", "u2"]);
    }

    #[tokio::test]
    async fn missing_arguments_fail_for_every_name() {
        let backend = StubBackend::new(Reply::Text("unused"));
        let d = dispatcher(backend.clone());

        for tool in [PERPLEXITY_ASK, PERPLEXITY_RESEARCH, PERPLEXITY_REASON, "nope"] {
            for args in [None, Some(JsonValue::Null), Some(json!({}))] {
                let msg = failure_message(d.dispatch(InvokeRequest::new(tool, args)).await);
                assert!(msg.contains("No arguments provided"), "{}", msg);
            }
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_names_the_tool() {
        let d = dispatcher(StubBackend::new(Reply::Text("unused")));

        let request = InvokeRequest::new("perplexity_search", Some(hi()));
        let msg = failure_message(d.dispatch(request).await);

        assert_eq!(msg, "Unknown tool: perplexity_search");
    }

    #[tokio::test]
    async fn non_array_messages_fail_for_every_tool() {
        let backend = StubBackend::new(Reply::Text("unused"));
        let d = dispatcher(backend.clone());

        for tool in [PERPLEXITY_ASK, PERPLEXITY_RESEARCH, PERPLEXITY_REASON] {
            let cases = [
                json!({"messages": "hi"}),
                json!({"other": 1}),
                json!({"messages": {"role": "user"}}),
            ];
            for args in cases {
                let msg = failure_message(d.dispatch(InvokeRequest::new(tool, Some(args))).await);
                assert_eq!(
                    msg,
                    format!("Invalid arguments for {}: 'messages' must be an array", tool)
                );
            }
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn extra_message_fields_are_forwarded() {
        let backend = StubBackend::new(Reply::Text("ok"));
        let d = dispatcher(backend.clone());
        let args = json!({"messages": [{"role": "user", "content": "hi", "name": "alice"}]});

        d.dispatch(InvokeRequest::new(PERPLEXITY_ASK, Some(args))).await;

        let sent = serde_json::to_value(&backend.calls()[0].0).unwrap();
        assert_eq!(sent, json!([{"role": "user", "content": "hi", "name": "alice"}]));
    }

    #[tokio::test]
    async fn malformed_message_element_is_rejected() {
        let d = dispatcher(StubBackend::new(Reply::Text("unused")));
        let args = json!({"messages": [{"role": "user", "content": "ok"}, {"role": "user"}]});

        let msg = failure_message(d.dispatch(InvokeRequest::new(PERPLEXITY_ASK, Some(args))).await);

        assert!(msg.contains("'messages' must be an array"), "{}", msg);
        assert!(msg.contains("element 1"), "{}", msg);
    }

    #[tokio::test]
    async fn backend_status_error_becomes_failure() {
        let d = dispatcher(StubBackend::new(Reply::Status(500, "server error")));

        let msg = failure_message(d.dispatch(InvokeRequest::new(PERPLEXITY_ASK, Some(hi()))).await);

        assert!(msg.contains("500"));
        assert!(msg.contains("server error"));
    }

    #[tokio::test]
    async fn malformed_backend_payload_becomes_failure() {
        let d = dispatcher(StubBackend::new(Reply::Malformed));

        let request = InvokeRequest::new(PERPLEXITY_REASON, Some(hi()));
        let msg = failure_message(d.dispatch(request).await);

        assert!(msg.starts_with("Failed to parse JSON response"));
    }

    #[test]
    fn validation_checks_arguments_before_tool_name() {
        let d = dispatcher(StubBackend::new(Reply::Text("unused")));
        let err = d.validate(&InvokeRequest::new("nope", None)).unwrap_err();
        assert!(matches!(err, DispatchError::NoArguments));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn invoker_trait_yields_same_envelope() {
        let d = dispatcher(StubBackend::new(Reply::Text("hello")));
        let invoker: &dyn ToolInvoker = &d;

        let result = invoker.invoke(InvokeRequest::new(PERPLEXITY_ASK, Some(hi()))).await;

        assert_eq!(result, InvokeResult::success("hello"));
    }

    #[test]
    fn catalog_matches_registry_order() {
        let d = dispatcher(StubBackend::new(Reply::Text("unused")));
        let names: Vec<String> = d.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec![PERPLEXITY_ASK, PERPLEXITY_RESEARCH, PERPLEXITY_REASON]);
    }
}
