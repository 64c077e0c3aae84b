//! Stub backends and runtimes shared by the session tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::client::{ChatCompletion, ClientConfig, ClientFactory, TextStream};
use super::runtime::{AgentDescriptor, AgentRuntime, ChunkStream, LocalRuntime};
use super::{ChatMessage, SessionError};

/// What every stub client created by a [`StubFactory`] answers.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub reply: String,
    pub fragments: Vec<String>,
    pub fail: bool,
    /// Keep the stream open after the last fragment.
    pub hang: bool,
}

impl Script {
    pub fn reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::default()
        }
    }

    pub fn fragments(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn hanging(fragments: &[&str]) -> Self {
        Self {
            hang: true,
            ..Self::fragments(fragments)
        }
    }
}

/// One backend call observed by a stub client.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

struct StubClient {
    model: String,
    script: Script,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl StubClient {
    fn record(&self, messages: &[ChatMessage]) {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.push(Invocation {
                model: self.model.clone(),
                messages: messages.to_vec(),
            });
        }
    }
}

#[async_trait]
impl ChatCompletion for StubClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        self.record(messages);
        if self.script.fail {
            anyhow::bail!("connection refused");
        }
        Ok(self.script.reply.clone())
    }

    async fn complete_stream(&self, messages: &[ChatMessage]) -> anyhow::Result<TextStream> {
        self.record(messages);
        if self.script.fail {
            anyhow::bail!("connection refused");
        }

        let fragments = futures_util::stream::iter(self.script.fragments.clone().into_iter().map(Ok));
        if self.script.hang {
            Ok(Box::pin(fragments.chain(futures_util::stream::pending())))
        } else {
            Ok(Box::pin(fragments))
        }
    }
}

/// Client factory that records every backend call made by its clients.
pub struct StubFactory {
    script: Script,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl StubFactory {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            invocations: Arc::default(),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|invocations| invocations.clone())
            .unwrap_or_default()
    }
}

impl ClientFactory for StubFactory {
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn ChatCompletion>, SessionError> {
        Ok(Arc::new(StubClient {
            model: config.model.clone(),
            script: self.script.clone(),
            invocations: Arc::clone(&self.invocations),
        }))
    }
}

/// [`LocalRuntime`] wrapper counting lifecycle calls.
#[derive(Default)]
pub struct CountingRuntime {
    inner: LocalRuntime,
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    pub registrations: Mutex<Vec<String>>,
    pub fail_start: bool,
}

impl CountingRuntime {
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn registrations(&self) -> Vec<String> {
        self.registrations
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AgentRuntime for CountingRuntime {
    async fn start(&self) -> Result<(), SessionError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        // Widen the window for overlapping initialize calls.
        tokio::task::yield_now().await;
        if self.fail_start {
            return Err(SessionError::Runtime("address already in use".to_string()));
        }
        self.inner.start().await
    }

    async fn stop(&self) -> Result<(), SessionError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.inner.stop().await
    }

    async fn register(&self, descriptor: AgentDescriptor) -> Result<(), SessionError> {
        if let Ok(mut names) = self.registrations.lock() {
            names.push(descriptor.name.clone());
        }
        self.inner.register(descriptor).await
    }

    async fn run(&self, agent: &str, message: Bytes) -> Result<Bytes, SessionError> {
        self.inner.run(agent, message).await
    }

    async fn run_stream(&self, agent: &str, message: Bytes) -> Result<ChunkStream, SessionError> {
        self.inner.run_stream(agent, message).await
    }
}

pub fn client_json(model: &str) -> String {
    format!(r#"{{"model":"{model}"}}"#)
}
