//! Agent runtime: hosts named agents and routes encoded messages to them.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::SessionError;

/// Stream of encoded reply chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, SessionError>> + Send>>;

/// A runtime-hosted agent.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn handle(&self, message: Bytes) -> Result<Bytes, SessionError>;

    async fn handle_stream(&self, message: Bytes) -> Result<ChunkStream, SessionError>;
}

/// Registration record for an agent.
#[derive(Clone)]
pub struct AgentDescriptor {
    pub name: String,
    pub agent: Arc<dyn Agent>,
}

impl AgentDescriptor {
    pub fn new(name: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        Self {
            name: name.into(),
            agent,
        }
    }
}

/// The messaging runtime a session drives.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn start(&self) -> Result<(), SessionError>;

    /// Stops the runtime. In-flight runs end with [`SessionError::SessionClosed`].
    async fn stop(&self) -> Result<(), SessionError>;

    async fn register(&self, descriptor: AgentDescriptor) -> Result<(), SessionError>;

    async fn run(&self, agent: &str, message: Bytes) -> Result<Bytes, SessionError>;

    async fn run_stream(&self, agent: &str, message: Bytes) -> Result<ChunkStream, SessionError>;
}

#[derive(Default)]
struct LocalState {
    // Present while running; cancelled on stop.
    shutdown: Option<CancellationToken>,
    agents: HashMap<String, Arc<dyn Agent>>,
}

/// In-process runtime. Agents are called directly on the caller's task.
#[derive(Default)]
pub struct LocalRuntime {
    state: Mutex<LocalState>,
}

impl LocalRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, name: &str) -> Result<(Arc<dyn Agent>, CancellationToken), SessionError> {
        let state = self.lock();
        let token = state.shutdown.clone().ok_or(SessionError::SessionClosed)?;
        let agent = state
            .agents
            .get(name)
            .cloned()
            .ok_or_else(|| SessionError::UnknownAgent(name.to_string()))?;
        Ok((agent, token))
    }
}

#[async_trait]
impl AgentRuntime for LocalRuntime {
    async fn start(&self) -> Result<(), SessionError> {
        let mut state = self.lock();
        if state.shutdown.is_none() {
            state.shutdown = Some(CancellationToken::new());
            debug!("Agent runtime started");
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), SessionError> {
        let mut state = self.lock();
        if let Some(token) = state.shutdown.take() {
            token.cancel();
            state.agents.clear();
            debug!("Agent runtime stopped");
        }
        Ok(())
    }

    async fn register(&self, descriptor: AgentDescriptor) -> Result<(), SessionError> {
        let mut state = self.lock();
        if state.shutdown.is_none() {
            return Err(SessionError::SessionClosed);
        }
        if state.agents.contains_key(&descriptor.name) {
            return Err(SessionError::Runtime(format!(
                "agent '{}' is already registered",
                descriptor.name
            )));
        }

        debug!(agent = %descriptor.name, "Registered agent");
        state.agents.insert(descriptor.name, descriptor.agent);
        Ok(())
    }

    async fn run(&self, agent: &str, message: Bytes) -> Result<Bytes, SessionError> {
        let (agent, shutdown) = self.resolve(agent)?;

        tokio::select! {
            biased;
            () = shutdown.cancelled() => Err(SessionError::SessionClosed),
            reply = agent.handle(message) => reply,
        }
    }

    async fn run_stream(&self, agent: &str, message: Bytes) -> Result<ChunkStream, SessionError> {
        let (agent, shutdown) = self.resolve(agent)?;

        let chunks = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(SessionError::SessionClosed),
            chunks = agent.handle_stream(message) => chunks?,
        };

        Ok(Box::pin(until_stopped(chunks, shutdown)))
    }
}

/// Forwards `chunks` until the runtime stops, then yields a final
/// [`SessionError::SessionClosed`] instead of waiting on the backend.
fn until_stopped(
    mut chunks: ChunkStream,
    shutdown: CancellationToken,
) -> impl Stream<Item = Result<Bytes, SessionError>> + Send + 'static {
    async_stream::stream! {
        loop {
            let next = tokio::select! {
                biased;
                () = shutdown.cancelled() => None,
                next = chunks.next() => Some(next),
            };

            match next {
                None => {
                    yield Err(SessionError::SessionClosed);
                    return;
                }
                Some(Some(chunk)) => yield chunk,
                Some(None) => return,
            }
        }
    }
}
