//! Discord REST implementation of the chat platform seam.

use super::error::{DiscordError, DiscordErrorKind, found};
use async_trait::async_trait;
use concierge_core::{Channel, ChannelId, ChatPlatform, GuildId, Recipient, Role, RoleId, UserId};
use concierge_error::ChatResult;
use serenity::all::{
    ChannelId as SerenityChannelId, CreateMessage, GuildId as SerenityGuildId, Http,
    UserId as SerenityUserId,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves and messages Discord entities over the REST API.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    /// Create a platform authenticated with a bot token.
    pub fn new(token: &str) -> Self {
        Self::with_http(Arc::new(Http::new(token)))
    }

    /// Create a platform over an existing HTTP client.
    pub fn with_http(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    #[instrument(skip(self), fields(user_id = %user))]
    async fn resolve_user(&self, user: UserId) -> ChatResult<Option<Recipient>> {
        // Serenity ids are non-zero; zero can only come from a bad config.
        if user.get() == 0 {
            return Ok(None);
        }
        let found = found(self.http.get_user(SerenityUserId::new(user.get())).await)?;
        Ok(found.map(|u| Recipient::new(user, u.name)))
    }

    #[instrument(skip(self, recipient, content), fields(user_id = %recipient.id()))]
    async fn send_direct(&self, recipient: &Recipient, content: &str) -> ChatResult<()> {
        let user = SerenityUserId::new(recipient.id().get());
        let channel = user.create_dm_channel(&*self.http).await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string()))
        })?;
        channel
            .send_message(&*self.http, CreateMessage::new().content(content))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string())))?;
        debug!("Direct message sent");
        Ok(())
    }

    #[instrument(skip(self), fields(channel_id = %channel))]
    async fn resolve_channel(&self, channel: ChannelId) -> ChatResult<Option<Channel>> {
        if channel.get() == 0 {
            return Ok(None);
        }
        let found = found(
            self.http
                .get_channel(SerenityChannelId::new(channel.get()))
                .await,
        )?;
        // Only guild channels can carry a welcome message.
        Ok(found
            .and_then(|c| c.guild())
            .map(|c| Channel::new(channel, c.name)))
    }

    #[instrument(skip(self), fields(guild_id = %guild, role_id = %role))]
    async fn resolve_role(&self, guild: GuildId, role: RoleId) -> ChatResult<Option<Role>> {
        if guild.get() == 0 || role.get() == 0 {
            return Ok(None);
        }
        let roles = found(
            self.http
                .get_guild_roles(SerenityGuildId::new(guild.get()))
                .await,
        )?;
        Ok(roles
            .unwrap_or_default()
            .into_iter()
            .find(|r| r.id.get() == role.get())
            .map(|r| Role::new(role, r.name)))
    }

    #[instrument(skip(self, channel, content), fields(channel_id = %channel.id()))]
    async fn send_to_channel(&self, channel: &Channel, content: &str) -> ChatResult<()> {
        SerenityChannelId::new(channel.id().get())
            .say(&*self.http, content)
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string())))?;
        Ok(())
    }
}
