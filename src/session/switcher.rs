use std::sync::Arc;
use tracing::info;

use super::SessionError;
use super::client::{ClientConfig, ClientFactory, ClientHandle};

/// Replaces the chat-completion client shared by a session's agents.
pub struct ClientSwitcher {
    factory: Arc<dyn ClientFactory>,
    handle: ClientHandle,
}

impl ClientSwitcher {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            handle: ClientHandle::new(),
        }
    }

    /// The cell agents read their client from.
    pub fn handle(&self) -> ClientHandle {
        self.handle.clone()
    }

    /// Builds a client from `config_json` and makes it current for every
    /// agent call issued afterwards.
    pub fn switch_client(&self, config_json: &str) -> Result<(), SessionError> {
        let config = ClientConfig::from_json(config_json)?;
        let client = self.factory.create(&config)?;
        self.handle.replace(client);
        info!(model = %config.model, "Switched LLM");
        Ok(())
    }

    pub fn current_model(&self) -> Option<String> {
        self.handle.current().ok().map(|client| client.model().to_string())
    }
}
