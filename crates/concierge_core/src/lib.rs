//! Platform-agnostic logic for the Concierge community bot.
//!
//! The bot greets new members once per suppression window, sends a periodic
//! direct message to a fixed list of users, watches a log file for errors,
//! and reports problems to a fixed list of administrators. Everything here is
//! written against the [`ChatPlatform`] seam; the Discord implementation lives
//! in `concierge_social`.
//!
//! # Components
//!
//! - [`DirectMessenger`] - resolve-then-send with a process-wide send lock
//! - [`AdminNotifier`] - best-effort broadcast to administrators
//! - [`WelcomeGreeter`] - templated greeting behind a global suppression flag
//! - [`DirectMessageTask`] - periodic DMs with per-failure reports
//! - [`LogMonitor`] - error-marker scanning with cooldown and all-clear reports
//! - [`IntervalScheduler`] - idempotent named interval tasks
//! - [`ConnectionSupervisor`] - connection state, fixed-delay retry, event error boundary
//! - [`EventDispatcher`] - one entry point per chat event

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod dm_task;
mod greeter;
mod ids;
mod log_monitor;
mod messenger;
mod notifier;
mod platform;
mod scheduler;
mod supervisor;

pub use config::{
    AdminConfig, ConciergeConfig, DirectMessageConfig, KeepAliveConfig, LogMonitorConfig,
    LoggingConfig, ROLE_PLACEHOLDER, ReconnectConfig, ServerConfig, WelcomeConfig,
};
pub use dispatch::{DIRECT_MESSAGE_TASK, EventDispatcher, LOG_MONITOR_TASK};
pub use dm_task::{DirectMessageTask, DmReport};
pub use greeter::{GreetOutcome, WelcomeGreeter};
pub use ids::{ChannelId, GuildId, RoleId, UserId};
pub use log_monitor::{LogMonitor, MonitorState, PollReport, ScanOutcome};
pub use messenger::{Delivery, DirectMessenger};
pub use notifier::AdminNotifier;
pub use platform::{Channel, ChatPlatform, Recipient, Role};
pub use scheduler::IntervalScheduler;
pub use supervisor::{ConnectionState, ConnectionSupervisor, Connector};
