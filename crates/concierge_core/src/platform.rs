//! Chat platform seam.
//!
//! Everything the bot needs from a chat service goes through [`ChatPlatform`]:
//! resolving users, channels and roles by ID, and sending text. Lookups return
//! `Ok(None)` when the platform reports the entity does not exist, and `Err`
//! only for transport or permission failures.

use crate::{ChannelId, GuildId, RoleId, UserId};
use async_trait::async_trait;
use concierge_error::ChatResult;
use derive_getters::Getters;

/// A resolved direct-message recipient.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Recipient {
    id: UserId,
    name: String,
}

impl Recipient {
    /// Create a recipient.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A resolved text channel.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Channel {
    id: ChannelId,
    name: String,
}

impl Channel {
    /// Create a channel reference.
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A resolved community role.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Role {
    id: RoleId,
    name: String,
}

impl Role {
    /// Create a role reference.
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Mention markup that pings every member holding the role.
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

/// Trait for chat platform implementations.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Resolve a user by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the lookup request itself fails.
    async fn resolve_user(&self, user: UserId) -> ChatResult<Option<Recipient>>;

    /// Send a direct message to a resolved user.
    ///
    /// # Errors
    ///
    /// Returns error if the DM channel cannot be opened or the send fails.
    async fn send_direct(&self, recipient: &Recipient, content: &str) -> ChatResult<()>;

    /// Resolve a channel by ID.
    async fn resolve_channel(&self, channel: ChannelId) -> ChatResult<Option<Channel>>;

    /// Resolve a role within a community.
    async fn resolve_role(&self, guild: GuildId, role: RoleId) -> ChatResult<Option<Role>>;

    /// Send a message to a channel.
    async fn send_to_channel(&self, channel: &Channel, content: &str) -> ChatResult<()>;
}
