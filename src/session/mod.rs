//! Translation session orchestration.
//!
//! A [`TranslatorSession`] owns one agent runtime with two agents registered
//! on it:
//!
//! - `detector` - classifies input text into one of the configured languages
//! - `translator` - streams a translation for a structured [`Input`]
//!
//! Both agents read their chat-completion client from a shared
//! [`ClientHandle`], so switching LLMs takes effect for every call issued
//! afterwards without re-registering anything.

mod agent;
mod client;
mod detector;
mod engine;
mod error;
mod message;
mod orchestrator;
mod runtime;
mod switcher;

#[cfg(test)]
mod testing;

pub use agent::{ChatAgent, FAILURE_PREFIX, StructuredAgent};
pub use client::{ChatCompletion, ClientConfig, ClientFactory, ClientHandle, TextStream};
pub use detector::{DETECTOR_AGENT, LanguageDetector};
pub use engine::{TRANSLATOR_AGENT, TranslationEngine, TranslationStream, accumulate};
pub use error::SessionError;
pub use message::{ChatMessage, Input, Role, WireMessage};
pub use orchestrator::TranslatorSession;
pub use runtime::{Agent, AgentDescriptor, AgentRuntime, ChunkStream, LocalRuntime};
pub use switcher::ClientSwitcher;
