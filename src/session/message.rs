//! Messages exchanged between the session and its agents.
//!
//! Every message crosses the runtime in its encoded (JSON) form, the same
//! way an out-of-process runtime would see it.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::SessionError;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role + content pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A translation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub input_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl Input {
    pub fn new(
        input_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            input_text: input_text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// Wire encoding shared by everything sent through the agent runtime.
pub trait WireMessage: Serialize + DeserializeOwned {
    fn encode(&self) -> Result<Bytes, SessionError> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| SessionError::Codec(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Self, SessionError> {
        serde_json::from_slice(bytes).map_err(|e| SessionError::Codec(e.to_string()))
    }
}

impl WireMessage for ChatMessage {}

impl WireMessage for Input {}
