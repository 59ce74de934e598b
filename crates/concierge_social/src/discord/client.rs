//! Discord gateway session lifecycle.
//!
//! [`DiscordBot`] builds a fresh Serenity client for every `connect` call so
//! the supervisor can restart a failed session from scratch. Serenity's shard
//! runner handles resumes inside a session.

use super::error::{DiscordError, DiscordErrorKind};
use super::handler::ConciergeHandler;
use async_trait::async_trait;
use concierge_core::{Connector, EventDispatcher};
use concierge_error::ChatResult;
use parking_lot::Mutex;
use serenity::Client;
use serenity::all::{GatewayIntents, ShardManager};
use std::sync::Arc;
use tracing::{info, instrument};

/// Gateway intents the bot needs: guild events plus member joins.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::non_privileged() | GatewayIntents::GUILD_MEMBERS
}

/// Discord gateway client for Concierge.
pub struct DiscordBot {
    token: String,
    handler: ConciergeHandler,
    shard_manager: Mutex<Option<Arc<ShardManager>>>,
}

impl DiscordBot {
    /// Create a bot that forwards events to `dispatcher`.
    pub fn new(token: impl Into<String>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            token: token.into(),
            handler: ConciergeHandler::new(dispatcher),
            shard_manager: Mutex::new(None),
        }
    }

    /// Close the current session, if any.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let manager = self.shard_manager.lock().take();
        if let Some(manager) = manager {
            info!("Shutting down Discord shards");
            manager.shutdown_all().await;
        }
    }
}

#[async_trait]
impl Connector for DiscordBot {
    #[instrument(skip(self))]
    async fn connect(&self) -> ChatResult<()> {
        let intents = gateway_intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let mut client = Client::builder(&self.token, intents)
            .event_handler(self.handler.clone())
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        *self.shard_manager.lock() = Some(Arc::clone(&client.shard_manager));

        info!("Starting Discord client");
        let result = client.start().await;
        self.shard_manager.lock().take();

        result.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;
        Ok(())
    }
}
