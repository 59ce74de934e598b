//! Direct-message delivery.
//!
//! A single [`DirectMessenger`] is shared by the administrator notifier and the
//! periodic DM task. Its send lock serialises outbound direct messages so
//! concurrent reports never interleave on the shared transport; resolution
//! happens outside the lock.

use crate::{ChatPlatform, Recipient, UserId};
use concierge_error::ChatResult;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Result of a single delivery attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The message was sent.
    Delivered(Recipient),
    /// The platform does not know this user; nothing was sent.
    Unresolved,
}

/// Resolves users and sends them direct messages under a shared lock.
#[derive(Clone)]
pub struct DirectMessenger {
    platform: Arc<dyn ChatPlatform>,
    send_lock: Arc<Mutex<()>>,
}

impl DirectMessenger {
    /// Create a messenger over a platform.
    pub fn new(platform: Arc<dyn ChatPlatform>) -> Self {
        Self {
            platform,
            send_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying platform.
    pub fn platform(&self) -> &Arc<dyn ChatPlatform> {
        &self.platform
    }

    /// Resolve `user` and send `content`.
    ///
    /// # Errors
    ///
    /// Returns error if the lookup request fails or the send fails. A user the
    /// platform does not know is reported as [`Delivery::Unresolved`] instead.
    #[instrument(skip(self, content), fields(user_id = %user))]
    pub async fn deliver(&self, user: UserId, content: &str) -> ChatResult<Delivery> {
        let Some(recipient) = self.platform.resolve_user(user).await? else {
            return Ok(Delivery::Unresolved);
        };

        let _guard = self.send_lock.lock().await;
        self.platform.send_direct(&recipient, content).await?;
        debug!(recipient = %recipient.name(), "Direct message sent");

        Ok(Delivery::Delivered(recipient))
    }
}
