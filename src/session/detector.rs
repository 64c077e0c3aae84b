use std::sync::Arc;
use tracing::debug;

use super::agent::{ChatAgent, FAILURE_PREFIX};
use super::client::ClientHandle;
use super::message::{ChatMessage, WireMessage};
use super::runtime::{AgentDescriptor, AgentRuntime};
use super::SessionError;
use crate::translation::{AUTO, CandidateLanguages, build_detection_prompt};

/// Name the detector agent is registered under.
pub const DETECTOR_AGENT: &str = "detector";

/// Classifies text into one of the candidate languages.
pub struct LanguageDetector {
    runtime: Arc<dyn AgentRuntime>,
    languages: CandidateLanguages,
}

impl LanguageDetector {
    pub fn new(runtime: Arc<dyn AgentRuntime>, languages: CandidateLanguages) -> Self {
        Self { runtime, languages }
    }

    pub const fn languages(&self) -> &CandidateLanguages {
        &self.languages
    }

    pub fn descriptor(&self, client: ClientHandle) -> AgentDescriptor {
        let agent = ChatAgent::new(build_detection_prompt(&self.languages), client);
        AgentDescriptor::new(DETECTOR_AGENT, Arc::new(agent))
    }

    /// Detects the language of `text`.
    ///
    /// Always returns a candidate language or [`AUTO`]; out-of-vocabulary
    /// model output falls back to [`AUTO`]. Empty text never reaches the
    /// backend.
    pub async fn detect(&self, text: &str) -> Result<String, SessionError> {
        if text.is_empty() {
            return Ok(AUTO.to_string());
        }

        let reply = self
            .runtime
            .run(DETECTOR_AGENT, ChatMessage::user(text).encode()?)
            .await?;
        let detected = ChatMessage::decode(&reply)?.content;

        if detected.starts_with(FAILURE_PREFIX) {
            return Err(SessionError::Backend(detected));
        }

        let language = self.languages.normalize(&detected);
        debug!(raw = %detected.trim(), %language, "Detected language");
        Ok(language)
    }
}
