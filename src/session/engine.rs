//! Streaming translation.
//!
//! The engine yields the translation as a sequence of growing prefixes: each
//! item is the full text received so far, never a bare delta. Consumers that
//! display the result replace their text on every item.

use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;

use super::agent::StructuredAgent;
use super::client::ClientHandle;
use super::message::{ChatMessage, Input, WireMessage};
use super::runtime::{AgentDescriptor, AgentRuntime, ChunkStream};
use super::SessionError;
use crate::translation::{AUTO, render_translation_prompt};

/// Name the translator agent is registered under.
pub const TRANSLATOR_AGENT: &str = "translator";

/// Stream of translation prefixes.
pub type TranslationStream = Pin<Box<dyn Stream<Item = Result<String, SessionError>> + Send>>;

#[derive(Clone)]
pub struct TranslationEngine {
    runtime: Arc<dyn AgentRuntime>,
}

impl TranslationEngine {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime }
    }

    pub fn descriptor(client: ClientHandle) -> AgentDescriptor {
        let agent = StructuredAgent::new(render_translation_prompt, client);
        AgentDescriptor::new(TRANSLATOR_AGENT, Arc::new(agent))
    }

    /// Translates `text` from `source_lang` to `target_lang`.
    ///
    /// Nothing happens until the stream is polled. Empty text yields a single
    /// empty string and identical languages yield `text` unchanged, both
    /// without touching the backend. Backend failures end the stream with an
    /// `Err` item.
    pub fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslationStream {
        let runtime = Arc::clone(&self.runtime);
        let input = Input::new(text, source_lang, target_lang);

        Box::pin(async_stream::stream! {
            if input.input_text.is_empty() {
                yield Ok(String::new());
                return;
            }
            if input.source_lang == input.target_lang {
                yield Ok(input.input_text);
                return;
            }
            if input.target_lang == AUTO {
                yield Err(SessionError::InvalidTarget(input.target_lang));
                return;
            }

            let chunks = match request(runtime.as_ref(), &input).await {
                Ok(chunks) => chunks,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let mut prefixes = std::pin::pin!(accumulate(fragments(chunks)));
            while let Some(prefix) = prefixes.next().await {
                yield prefix;
            }
        })
    }
}

async fn request(runtime: &dyn AgentRuntime, input: &Input) -> Result<ChunkStream, SessionError> {
    runtime.run_stream(TRANSLATOR_AGENT, input.encode()?).await
}

fn fragments(chunks: ChunkStream) -> impl Stream<Item = Result<String, SessionError>> + Send {
    chunks.map(|chunk| {
        chunk
            .and_then(|bytes| ChatMessage::decode(&bytes))
            .map(|message| message.content)
    })
}

/// Folds a fragment stream into its running prefix sums.
///
/// `f1, f2, ..., fn` becomes `f1, f1+f2, ..., f1+...+fn`. The first error is
/// forwarded and ends the stream.
pub fn accumulate<S>(fragments: S) -> impl Stream<Item = Result<String, SessionError>> + Send
where
    S: Stream<Item = Result<String, SessionError>> + Send + 'static,
{
    async_stream::stream! {
        let mut fragments = std::pin::pin!(fragments);
        let mut translated = String::new();

        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(fragment) => {
                    translated.push_str(&fragment);
                    yield Ok(translated.clone());
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    }
}
