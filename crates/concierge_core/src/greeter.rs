//! Welcome greeting for new members.
//!
//! One greeting covers every join inside the suppression window, across all
//! communities: the flag is global, not per member or per community.

use crate::{AdminNotifier, ChatPlatform, GuildId, WelcomeConfig};
use concierge_error::ChatResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument, warn};

/// What the greeter did for a join notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GreetOutcome {
    /// The greeting was posted.
    #[display("sent")]
    Sent,
    /// A greeting was already posted inside the current window.
    #[display("suppressed")]
    Suppressed,
    /// The configured channel does not exist.
    #[display("missing channel")]
    MissingChannel,
    /// The configured role does not exist in the member's community.
    #[display("missing role")]
    MissingRole,
    /// A lookup or the send failed; administrators were told.
    #[display("failed")]
    Failed,
}

/// Posts the welcome template when members join.
#[derive(Clone)]
pub struct WelcomeGreeter {
    platform: Arc<dyn ChatPlatform>,
    config: WelcomeConfig,
    notifier: AdminNotifier,
    suppressed: Arc<AtomicBool>,
}

impl WelcomeGreeter {
    /// Create a greeter.
    pub fn new(platform: Arc<dyn ChatPlatform>, config: WelcomeConfig, notifier: AdminNotifier) -> Self {
        Self {
            platform,
            config,
            notifier,
            suppressed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a greeting window is open.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::Acquire)
    }

    /// Handle a member joining `guild`.
    ///
    /// Never fails: lookup and send errors are logged and forwarded to the
    /// administrators.
    #[instrument(skip(self), fields(guild_id = %guild))]
    pub async fn member_joined(&self, guild: GuildId) -> GreetOutcome {
        match self.greet(guild).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Welcome greeting failed");
                self.notifier
                    .notify(&format!("⚠️ Error on member join:\n{}", e.kind()))
                    .await;
                GreetOutcome::Failed
            }
        }
    }

    async fn greet(&self, guild: GuildId) -> ChatResult<GreetOutcome> {
        let channel = self.platform.resolve_channel(self.config.channel_id).await?;
        let role = self.platform.resolve_role(guild, self.config.role_id).await?;

        let Some(channel) = channel else {
            warn!(
                channel_id = %self.config.channel_id,
                "Welcome channel not found; set welcome.channel_id to a valid channel"
            );
            return Ok(GreetOutcome::MissingChannel);
        };
        let Some(role) = role else {
            warn!(
                role_id = %self.config.role_id,
                "Welcome role not found; set welcome.role_id to a valid role"
            );
            return Ok(GreetOutcome::MissingRole);
        };

        if self
            .suppressed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Greeting already sent in this window");
            return Ok(GreetOutcome::Suppressed);
        }

        // Armed before sending so a failed send cannot leave the flag stuck.
        self.arm_reset();

        let message = self.config.render(&role.mention());
        self.platform.send_to_channel(&channel, &message).await?;
        info!(channel = %channel.name(), role = %role.name(), "Welcome greeting sent");

        Ok(GreetOutcome::Sent)
    }

    fn arm_reset(&self) {
        let flag = Arc::clone(&self.suppressed);
        let window = self.config.suppression_window();
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            flag.store(false, Ordering::Release);
            debug!("Welcome suppression window closed");
        });
    }
}
