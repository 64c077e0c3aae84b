//! Per-session lifecycle of the agent runtime and its agents.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::client::ClientFactory;
use super::detector::LanguageDetector;
use super::engine::{TranslationEngine, TranslationStream};
use super::runtime::{AgentRuntime, LocalRuntime};
use super::switcher::ClientSwitcher;
use super::SessionError;
use crate::translation::{CandidateLanguages, ModelClientFactory};

#[derive(Debug, Default)]
struct SessionState {
    started: bool,
}

/// One interactive translation session.
///
/// Owns its runtime, agents and LLM client; nothing is shared between
/// sessions, so two sessions can talk to different backends at once.
pub struct TranslatorSession {
    runtime: Arc<dyn AgentRuntime>,
    switcher: ClientSwitcher,
    detector: LanguageDetector,
    engine: TranslationEngine,
    state: Mutex<SessionState>,
}

impl TranslatorSession {
    /// Creates a session backed by an in-process runtime and
    /// OpenAI-compatible clients.
    pub fn new(languages: CandidateLanguages) -> Self {
        Self::with_parts(
            Arc::new(LocalRuntime::new()),
            Arc::new(ModelClientFactory),
            languages,
        )
    }

    pub fn with_parts(
        runtime: Arc<dyn AgentRuntime>,
        factory: Arc<dyn ClientFactory>,
        languages: CandidateLanguages,
    ) -> Self {
        Self {
            detector: LanguageDetector::new(Arc::clone(&runtime), languages),
            engine: TranslationEngine::new(Arc::clone(&runtime)),
            switcher: ClientSwitcher::new(factory),
            state: Mutex::new(SessionState::default()),
            runtime,
        }
    }

    /// Starts the runtime, registers both agents and selects the default LLM.
    ///
    /// Calling this on a started session does nothing. Concurrent callers
    /// wait for the first one to finish. On failure the runtime is stopped
    /// again so a later call can retry from scratch.
    pub async fn initialize(&self, default_client_json: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        if state.started {
            debug!("Session already initialized");
            return Ok(());
        }

        self.runtime.start().await?;

        if let Err(e) = self.register_agents(default_client_json).await {
            if let Err(stop_err) = self.runtime.stop().await {
                warn!(error = %stop_err, "Failed to stop runtime after failed initialization");
            }
            return Err(e);
        }

        state.started = true;
        info!("Session initialized");
        Ok(())
    }

    async fn register_agents(&self, default_client_json: &str) -> Result<(), SessionError> {
        let client = self.switcher.handle();
        self.runtime
            .register(self.detector.descriptor(client.clone()))
            .await?;
        self.runtime
            .register(TranslationEngine::descriptor(client))
            .await?;
        self.switcher.switch_client(default_client_json)
    }

    /// Stops the runtime. In-flight translations end with
    /// [`SessionError::SessionClosed`].
    pub async fn cleanup(&self) {
        let mut state = self.state.lock().await;
        if let Err(e) = self.runtime.stop().await {
            warn!(error = %e, "Failed to stop runtime");
        }
        if state.started {
            info!("Session closed");
        }
        state.started = false;
    }

    pub async fn is_started(&self) -> bool {
        self.state.lock().await.started
    }

    pub fn switch_client(&self, config_json: &str) -> Result<(), SessionError> {
        self.switcher.switch_client(config_json)
    }

    pub fn current_model(&self) -> Option<String> {
        self.switcher.current_model()
    }

    pub async fn detect(&self, text: &str) -> Result<String, SessionError> {
        self.detector.detect(text).await
    }

    pub fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslationStream {
        self.engine.translate(text, source_lang, target_lang)
    }

    pub const fn languages(&self) -> &CandidateLanguages {
        self.detector.languages()
    }
}
