//! Server state

use std::sync::Arc;

use crate::cache::TableCache;
use crate::clients::{HttpPosClient, MockPosClient, PosClient, TokenManager};
use crate::core::Config;
use crate::services::{ChatBackend, GroqChat};

/// Server state - shared handles to every long-lived service
///
/// Cloned into each request handler; all fields are cheap shared
/// references.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | immutable configuration |
/// | cache | table snapshot cache |
/// | pos | POS client (mock in dev mode) |
/// | chat | text-generation backend |
/// | tokens | POS token manager |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub cache: TableCache,
    pub pos: Arc<dyn PosClient>,
    pub chat: Arc<dyn ChatBackend>,
    pub tokens: TokenManager,
}

impl ServerState {
    /// Build the state from configuration, selecting the POS client by
    /// operating mode
    pub fn initialize(config: &Config) -> Self {
        let tokens = TokenManager::new(config.is_development(), config.auth_server_url.clone());

        let pos: Arc<dyn PosClient> = if config.is_development() {
            tracing::info!("Running in development mode. Using the mock POS client.");
            Arc::new(MockPosClient::new(tokens.clone()))
        } else {
            tracing::info!("Running in production mode. Using the POS bridge client.");
            Arc::new(HttpPosClient::new(
                config.pos_service_url.clone(),
                tokens.clone(),
            ))
        };

        Self {
            config: config.clone(),
            cache: TableCache::new(),
            pos,
            chat: Arc::new(GroqChat::from_config(config)),
            tokens,
        }
    }
}
