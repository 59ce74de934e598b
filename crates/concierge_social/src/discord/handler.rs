//! Serenity event handler.
//!
//! Translates gateway events into [`EventDispatcher`] calls. Handlers never
//! return errors to Serenity; the dispatcher's error boundary absorbs them.

use concierge_core::{ConnectionState, EventDispatcher, GuildId, UserId};
use serenity::all::{
    ConnectionStage, Context, EventHandler, Member, Ready, ResumedEvent, ShardStageUpdateEvent,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Map a shard stage to the bot's connection state.
pub fn connection_state(stage: ConnectionStage) -> ConnectionState {
    match stage {
        ConnectionStage::Connected => ConnectionState::Connected,
        ConnectionStage::Disconnected => ConnectionState::Disconnected,
        _ => ConnectionState::Reconnecting,
    }
}

/// Forwards Discord events to the dispatcher.
#[derive(Clone)]
pub struct ConciergeHandler {
    dispatcher: Arc<EventDispatcher>,
}

impl ConciergeHandler {
    /// Create a handler.
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The dispatcher receiving events.
    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }
}

#[async_trait]
impl EventHandler for ConciergeHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.dispatcher.ready(&ready.user.tag()).await;
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        info!("Gateway session resumed");
        self.dispatcher.connection_changed(ConnectionState::Connected);
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        debug!(shard = ?event.shard_id, old = ?event.old, new = ?event.new, "Shard stage changed");
        self.dispatcher.connection_changed(connection_state(event.new));
    }

    async fn guild_member_addition(&self, _ctx: Context, member: Member) {
        let guild = GuildId(member.guild_id.get());
        let user = UserId(member.user.id.get());
        info!(guild_id = %guild, user_id = %user, name = %member.user.name, "Member joined");
        self.dispatcher.member_joined(guild, user).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        assert_eq!(connection_state(ConnectionStage::Connected), ConnectionState::Connected);
        assert_eq!(
            connection_state(ConnectionStage::Disconnected),
            ConnectionState::Disconnected
        );
        for stage in [
            ConnectionStage::Connecting,
            ConnectionStage::Handshake,
            ConnectionStage::Identifying,
            ConnectionStage::Resuming,
        ] {
            assert_eq!(connection_state(stage), ConnectionState::Reconnecting);
        }
    }
}
