//! Event dispatch.
//!
//! Platform event handlers forward to [`EventDispatcher`], one method per
//! event kind. Every invocation runs inside the supervisor's error boundary.

use crate::{
    ConnectionState, ConnectionSupervisor, DirectMessageTask, GreetOutcome, GuildId,
    IntervalScheduler, LogMonitor, UserId, WelcomeGreeter,
};
use concierge_error::{ConciergeError, ConciergeResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Scheduler ID of the periodic DM task.
pub const DIRECT_MESSAGE_TASK: &str = "direct_messages";

/// Scheduler ID of the log monitor.
pub const LOG_MONITOR_TASK: &str = "log_monitor";

/// Routes chat events to the bot's components.
pub struct EventDispatcher {
    greeter: WelcomeGreeter,
    direct_messages: Arc<DirectMessageTask>,
    direct_message_period: Duration,
    log_monitor: Option<(Arc<LogMonitor>, Duration)>,
    scheduler: IntervalScheduler,
    supervisor: Arc<ConnectionSupervisor>,
}

impl EventDispatcher {
    /// Create a dispatcher.
    pub fn new(
        greeter: WelcomeGreeter,
        direct_messages: DirectMessageTask,
        direct_message_period: Duration,
        scheduler: IntervalScheduler,
        supervisor: Arc<ConnectionSupervisor>,
    ) -> Self {
        Self {
            greeter,
            direct_messages: Arc::new(direct_messages),
            direct_message_period,
            log_monitor: None,
            scheduler,
            supervisor,
        }
    }

    /// Also start a log monitor polling every `period` once ready.
    pub fn with_log_monitor(mut self, monitor: LogMonitor, period: Duration) -> Self {
        self.log_monitor = Some((Arc::new(monitor), period));
        self
    }

    /// The supervisor guarding this dispatcher's handlers.
    pub fn supervisor(&self) -> &Arc<ConnectionSupervisor> {
        &self.supervisor
    }

    /// The scheduler owning the periodic tasks.
    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    /// The bot logged in.
    #[instrument(skip(self))]
    pub async fn ready(&self, bot_name: &str) {
        info!("Logged in as {}", bot_name);
        self.supervisor.set_state(ConnectionState::Connected);
        self.supervisor
            .intercept("ready", bot_name, self.start_periodic_tasks())
            .await;
    }

    /// Start the periodic tasks that are not already running.
    pub async fn start_periodic_tasks(&self) -> ConciergeResult<()> {
        let task = Arc::clone(&self.direct_messages);
        let started = self
            .scheduler
            .schedule(DIRECT_MESSAGE_TASK, self.direct_message_period, move || {
                let task = Arc::clone(&task);
                async move {
                    task.run_once().await;
                    Ok(())
                }
            })
            .await?;
        if started {
            info!("Starting direct message task");
        } else {
            info!("Direct message task is already running");
        }

        if let Some((monitor, period)) = &self.log_monitor {
            let monitor = Arc::clone(monitor);
            let started = self
                .scheduler
                .schedule(LOG_MONITOR_TASK, *period, move || {
                    let monitor = Arc::clone(&monitor);
                    async move {
                        monitor.poll().await;
                        Ok(())
                    }
                })
                .await?;
            if started {
                info!("Starting log monitor");
            }
        }

        Ok(())
    }

    /// A member joined a community.
    #[instrument(skip(self))]
    pub async fn member_joined(&self, guild: GuildId, user: UserId) -> Option<GreetOutcome> {
        let args = format!("guild_id={}, user_id={}", guild, user);
        self.supervisor
            .intercept("member_joined", &args, async {
                Ok::<_, ConciergeError>(self.greeter.member_joined(guild).await)
            })
            .await
    }

    /// The gateway connection changed state.
    pub fn connection_changed(&self, state: ConnectionState) {
        self.supervisor.set_state(state);
    }
}
