//! Agents backed by the session's chat-completion client.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::sync::Arc;

use super::client::{ChatCompletion, ClientHandle};
use super::message::{ChatMessage, Input, WireMessage};
use super::runtime::{Agent, ChunkStream};
use super::SessionError;

/// Prefix of the reply an agent sends back when the backend call fails.
pub const FAILURE_PREFIX: &str = "Failed to chat with";

fn failure_message(model: &str, err: &anyhow::Error) -> String {
    format!("{FAILURE_PREFIX} {model}: {err:#}")
}

/// Agent with a fixed system prompt that forwards each user message.
pub struct ChatAgent {
    system: String,
    client: ClientHandle,
}

impl ChatAgent {
    pub fn new(system: impl Into<String>, client: ClientHandle) -> Self {
        Self {
            system: system.into(),
            client,
        }
    }

    fn messages(&self, message: &[u8]) -> Result<Vec<ChatMessage>, SessionError> {
        let user = ChatMessage::decode(message)?;
        Ok(vec![ChatMessage::system(self.system.as_str()), user])
    }
}

#[async_trait]
impl Agent for ChatAgent {
    async fn handle(&self, message: Bytes) -> Result<Bytes, SessionError> {
        let messages = self.messages(&message)?;
        reply(self.client.current()?, &messages).await
    }

    async fn handle_stream(&self, message: Bytes) -> Result<ChunkStream, SessionError> {
        let messages = self.messages(&message)?;
        reply_stream(self.client.current()?, &messages).await
    }
}

/// Agent whose system prompt is rendered from a structured [`Input`].
pub struct StructuredAgent {
    render_system: fn(&Input) -> String,
    client: ClientHandle,
}

impl StructuredAgent {
    pub fn new(render_system: fn(&Input) -> String, client: ClientHandle) -> Self {
        Self {
            render_system,
            client,
        }
    }

    fn messages(&self, message: &[u8]) -> Result<Vec<ChatMessage>, SessionError> {
        let input = Input::decode(message)?;
        Ok(vec![
            ChatMessage::system((self.render_system)(&input)),
            ChatMessage::user(input.input_text),
        ])
    }
}

#[async_trait]
impl Agent for StructuredAgent {
    async fn handle(&self, message: Bytes) -> Result<Bytes, SessionError> {
        let messages = self.messages(&message)?;
        reply(self.client.current()?, &messages).await
    }

    async fn handle_stream(&self, message: Bytes) -> Result<ChunkStream, SessionError> {
        let messages = self.messages(&message)?;
        reply_stream(self.client.current()?, &messages).await
    }
}

// Backend failures become a FAILURE_PREFIX reply rather than an error, so
// callers on the other side of the runtime can still read them.
async fn reply(
    client: Arc<dyn ChatCompletion>,
    messages: &[ChatMessage],
) -> Result<Bytes, SessionError> {
    let content = match client.complete(messages).await {
        Ok(content) => content,
        Err(e) => failure_message(client.model(), &e),
    };
    ChatMessage::assistant(content).encode()
}

async fn reply_stream(
    client: Arc<dyn ChatCompletion>,
    messages: &[ChatMessage],
) -> Result<ChunkStream, SessionError> {
    let mut fragments = client
        .complete_stream(messages)
        .await
        .map_err(|e| SessionError::Backend(failure_message(client.model(), &e)))?;

    let chunks = async_stream::stream! {
        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(content) => yield ChatMessage::assistant(content).encode(),
                Err(e) => {
                    yield Err(SessionError::Backend(failure_message(client.model(), &e)));
                    return;
                }
            }
        }
    };

    Ok(Box::pin(chunks))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::client::{ClientConfig, ClientFactory};
    use crate::session::message::Role;
    use crate::session::testing::{Script, StubFactory};

    fn handle_for(factory: &StubFactory, model: &str) -> ClientHandle {
        let handle = ClientHandle::new();
        let config = ClientConfig::from_json(&format!(r#"{{"model":"{model}"}}"#)).unwrap();
        handle.replace(factory.create(&config).unwrap());
        handle
    }

    #[tokio::test]
    async fn test_chat_agent_sends_system_then_user() {
        let factory = StubFactory::new(Script::reply("French"));
        let agent = ChatAgent::new("Detect the language.", handle_for(&factory, "gpt-4o"));

        let reply = agent
            .handle(ChatMessage::user("Bonjour").encode().unwrap())
            .await
            .unwrap();
        assert_eq!(ChatMessage::decode(&reply).unwrap(), ChatMessage::assistant("French"));

        let calls = factory.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].messages,
            vec![
                ChatMessage::system("Detect the language."),
                ChatMessage::user("Bonjour"),
            ]
        );
    }

    #[tokio::test]
    async fn test_chat_agent_reports_backend_failure_as_reply() {
        let factory = StubFactory::new(Script::failing());
        let agent = ChatAgent::new("Detect the language.", handle_for(&factory, "gpt-4o"));

        let reply = agent
            .handle(ChatMessage::user("Bonjour").encode().unwrap())
            .await
            .unwrap();
        let reply = ChatMessage::decode(&reply).unwrap();

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with("Failed to chat with gpt-4o"));
    }

    #[tokio::test]
    async fn test_agent_without_client() {
        let agent = ChatAgent::new("Detect the language.", ClientHandle::new());
        let result = agent.handle(ChatMessage::user("Bonjour").encode().unwrap()).await;
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[tokio::test]
    async fn test_structured_agent_renders_system_prompt() {
        let factory = StubFactory::new(Script::fragments(&["Hello"]));
        let agent = StructuredAgent::new(
            |input| format!("to {}", input.target_lang),
            handle_for(&factory, "gpt-4o"),
        );

        let chunks: Vec<_> = agent
            .handle_stream(Input::new("Bonjour", "auto", "English").encode().unwrap())
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(chunks.len(), 1);

        let calls = factory.invocations();
        assert_eq!(
            calls[0].messages,
            vec![ChatMessage::system("to English"), ChatMessage::user("Bonjour")]
        );
    }

    #[tokio::test]
    async fn test_structured_agent_rejects_chat_message() {
        let factory = StubFactory::new(Script::fragments(&["Hello"]));
        let agent = StructuredAgent::new(|_| String::new(), handle_for(&factory, "gpt-4o"));

        let result = agent
            .handle_stream(ChatMessage::user("Bonjour").encode().unwrap())
            .await;
        assert!(matches!(result, Err(SessionError::Codec(_))));
        assert!(factory.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_stream_failure_is_backend_error() {
        let factory = StubFactory::new(Script::failing());
        let agent = StructuredAgent::new(|_| String::new(), handle_for(&factory, "gpt-4o"));

        let result = agent
            .handle_stream(Input::new("Bonjour", "auto", "English").encode().unwrap())
            .await;
        let Err(SessionError::Backend(message)) = result else {
            panic!("expected a backend error");
        };
        assert!(message.starts_with(FAILURE_PREFIX));
    }
}
