use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::sse_parser::sse_to_text_stream;
use crate::session::{
    ChatCompletion, ChatMessage, ClientConfig, ClientFactory, SessionError, TextStream,
};

/// Endpoint used when a configuration has no `api_base`.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    // Provider-specific settings (temperature, max_tokens, ...) pass through.
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ModelClient {
    client: Client,
    model: String,
    api_base: String,
    api_key: Option<String>,
    api_version: Option<String>,
    extra: Map<String, Value>,
}

impl ModelClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            model: config.model.clone(),
            api_base: config
                .api_base
                .clone()
                .filter(|base| !base.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            api_version: config.api_version.clone(),
            extra: config.extra.clone(),
        }
    }

    pub fn url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        match &self.api_version {
            Some(version) => format!("{base}/chat/completions?api-version={version}"),
            None => format!("{base}/chat/completions"),
        }
    }

    async fn send(&self, messages: &[ChatMessage], stream: bool) -> Result<Response> {
        let url = self.url();
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            stream,
            extra: &self.extra,
        };

        let mut http_request = self.client.post(&url).json(&body);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatCompletion for ModelClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let response: CompletionResponse = self
            .send(messages, false)
            .await?
            .json()
            .await
            .context("Failed to parse completion response")?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("Completion response contained no message")
    }

    async fn complete_stream(&self, messages: &[ChatMessage]) -> Result<TextStream> {
        let response = self.send(messages, true).await?;
        Ok(Box::pin(sse_to_text_stream(response.bytes_stream())))
    }
}

/// Builds [`ModelClient`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelClientFactory;

impl ClientFactory for ModelClientFactory {
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn ChatCompletion>, SessionError> {
        Ok(Arc::new(ModelClient::new(config)))
    }
}
