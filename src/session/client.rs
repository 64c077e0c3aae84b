//! Chat-completion client abstraction and the shared client cell.

use async_trait::async_trait;
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use super::{ChatMessage, SessionError};

/// Stream of generated text fragments (deltas, not prefixes).
pub type TextStream = Pin<Box<dyn Stream<Item = anyhow::Result<String>> + Send>>;

/// Settings for one LLM backend.
///
/// Only `model` is required. Provider-specific fields not known here are kept
/// in `extra` and forwarded with each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, alias = "base_url", skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientConfig {
    /// Parses a JSON settings blob.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SessionError::Config(e.to_string()))?;

        if config.model.trim().is_empty() {
            return Err(SessionError::Config("'model' must not be empty".to_string()));
        }

        Ok(config)
    }
}

/// An opaque chat-completion capability.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Model name, used in logs and failure messages.
    fn model(&self) -> &str;

    /// Returns the whole completion at once.
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String>;

    /// Streams the completion as it is generated.
    async fn complete_stream(&self, messages: &[ChatMessage]) -> anyhow::Result<TextStream>;
}

/// Builds chat-completion clients from configuration.
pub trait ClientFactory: Send + Sync {
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn ChatCompletion>, SessionError>;
}

/// Mutable cell holding the client every agent of a session talks to.
///
/// Clones share the cell. Readers take a snapshot, so a replacement never
/// reaches a call that already started.
#[derive(Clone, Default)]
pub struct ClientHandle {
    inner: Arc<RwLock<Option<Arc<dyn ChatCompletion>>>>,
}

impl ClientHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, client: Arc<dyn ChatCompletion>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(client);
    }

    pub fn current(&self) -> Result<Arc<dyn ChatCompletion>, SessionError> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| SessionError::Config("no LLM has been selected".to_string()))
    }
}
