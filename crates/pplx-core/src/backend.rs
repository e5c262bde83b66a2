//! Chat completion calls against the Perplexity API.
//!
//! One POST per invocation, no retries. Failures are classified into
//! [`BackendError`] so the dispatcher can report them uniformly.

use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

/// Substituted when a non-success response body cannot be read.
pub const UNREADABLE_BODY: &str = "Unable to parse error response";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error while calling Perplexity API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Perplexity API error: {status} {reason}\n{body}")]
    ApiStatus { status: u16, reason: String, body: String },

    #[error("Failed to parse JSON response from Perplexity API: {0}")]
    MalformedResponse(String),
}

/// Anything that can turn a conversation into completion text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_key: String,
    pub endpoint: String,
    /// None keeps the network layer's own behavior (no explicit timeout)
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    pub fn new<K: Into<String>>(api_key: K) -> Self {
        Self { api_key: api_key.into(), endpoint: DEFAULT_ENDPOINT.to_string(), timeout: None }
    }

    pub fn with_endpoint<E: Into<String>>(mut self, endpoint: E) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Backend client for the Perplexity chat completions endpoint
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl PerplexityClient {
    pub fn new(config: BackendConfig) -> Self {
        Self { config, http: reqwest::Client::new() }
    }
}

#[async_trait]
impl CompletionBackend for PerplexityClient {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<String, BackendError> {
        let body = ChatRequest { model, messages };

        debug!("Completion request to model: {} ({} messages)", model, messages.len());

        let mut request =
            self.http.post(&self.config.endpoint).bearer_auth(&self.config.api_key).json(&body);
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(BackendError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(BackendError::ApiStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        // A body cut off mid-read is a transport failure, not a bad payload
        let bytes = response.bytes().await.map_err(BackendError::Network)?;
        let payload: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        let text = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                BackendError::MalformedResponse("response contained no choices".to_string())
            })?;

        Ok(match payload.citations {
            Some(citations) => append_citations(text, &citations),
            None => text,
        })
    }
}

fn error_body<E>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|_| UNREADABLE_BODY.to_string())
}

/// Append a numbered `Citations:` block; a no-op for an empty list.
pub fn append_citations(mut text: String, citations: &[String]) -> String {
    if citations.is_empty() {
        return text;
    }
    text.push_str("\n\nCitations:\n");
    for (index, citation) in citations.iter().enumerate() {
        text.push_str(&format!("[{}] {}\n", index + 1, citation));
    }
    text
}
