//! Shared in-memory chat platform for behaviour tests.

#![allow(dead_code)]

use async_trait::async_trait;
use concierge_core::{
    AdminNotifier, Channel, ChannelId, ChatPlatform, DirectMessenger, GuildId, Recipient, Role,
    RoleId, UserId,
};
use concierge_error::{ChatError, ChatErrorKind, ChatResult};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Mock platform that records every send.
#[derive(Default)]
pub struct MockPlatform {
    missing_users: HashSet<u64>,
    unreachable_users: HashSet<u64>,
    failing_sends: HashSet<u64>,
    missing_channel: bool,
    missing_role: bool,
    failing_channel_send: bool,
    direct: Mutex<Vec<(UserId, String)>>,
    channel: Mutex<Vec<(ChannelId, String)>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup returns "not found" for this user.
    pub fn with_missing_user(mut self, id: u64) -> Self {
        self.missing_users.insert(id);
        self
    }

    /// Lookup request itself fails for this user.
    pub fn with_unreachable_user(mut self, id: u64) -> Self {
        self.unreachable_users.insert(id);
        self
    }

    /// Sending a DM to this user fails.
    pub fn with_failing_send(mut self, id: u64) -> Self {
        self.failing_sends.insert(id);
        self
    }

    pub fn with_missing_channel(mut self) -> Self {
        self.missing_channel = true;
        self
    }

    pub fn with_missing_role(mut self) -> Self {
        self.missing_role = true;
        self
    }

    pub fn with_failing_channel_send(mut self) -> Self {
        self.failing_channel_send = true;
        self
    }

    pub fn direct_messages(&self) -> Vec<(UserId, String)> {
        self.direct.lock().clone()
    }

    pub fn direct_messages_to(&self, id: u64) -> Vec<String> {
        self.direct
            .lock()
            .iter()
            .filter(|(user, _)| user.get() == id)
            .map(|(_, content)| content.clone())
            .collect()
    }

    pub fn channel_messages(&self) -> Vec<(ChannelId, String)> {
        self.channel.lock().clone()
    }
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    async fn resolve_user(&self, user: UserId) -> ChatResult<Option<Recipient>> {
        if self.unreachable_users.contains(&user.get()) {
            return Err(ChatError::new(ChatErrorKind::Lookup(
                "Mock lookup failure".to_string(),
            )));
        }
        if self.missing_users.contains(&user.get()) {
            return Ok(None);
        }
        Ok(Some(Recipient::new(user, format!("user-{}", user))))
    }

    async fn send_direct(&self, recipient: &Recipient, content: &str) -> ChatResult<()> {
        if self.failing_sends.contains(&recipient.id().get()) {
            return Err(ChatError::new(ChatErrorKind::SendFailed(
                "Cannot send messages to this user".to_string(),
            )));
        }
        self.direct
            .lock()
            .push((*recipient.id(), content.to_string()));
        Ok(())
    }

    async fn resolve_channel(&self, channel: ChannelId) -> ChatResult<Option<Channel>> {
        if self.missing_channel {
            return Ok(None);
        }
        Ok(Some(Channel::new(channel, "welcome")))
    }

    async fn resolve_role(&self, _guild: GuildId, role: RoleId) -> ChatResult<Option<Role>> {
        if self.missing_role {
            return Ok(None);
        }
        Ok(Some(Role::new(role, "members")))
    }

    async fn send_to_channel(&self, channel: &Channel, content: &str) -> ChatResult<()> {
        if self.failing_channel_send {
            return Err(ChatError::new(ChatErrorKind::SendFailed(
                "Missing Permissions".to_string(),
            )));
        }
        self.channel.lock().push((*channel.id(), content.to_string()));
        Ok(())
    }
}

pub const ADMIN_A: u64 = 100;
pub const ADMIN_B: u64 = 200;

/// Messenger and notifier over `platform` with the two test administrators.
pub fn notifier_for(platform: Arc<MockPlatform>) -> (DirectMessenger, AdminNotifier) {
    let messenger = DirectMessenger::new(platform);
    let notifier = AdminNotifier::new(messenger.clone(), vec![UserId(ADMIN_A), UserId(ADMIN_B)]);
    (messenger, notifier)
}
