//! Periodic direct messages to a fixed list of users.

use crate::{AdminNotifier, Delivery, DirectMessageConfig, DirectMessenger, UserId};
use derive_getters::Getters;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Outcome of one pass over the target list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct DmReport {
    /// Users who received the message
    delivered: Vec<UserId>,
    /// Users the platform could not resolve
    unresolved: Vec<UserId>,
    /// Users whose send failed, with the failure detail
    failures: Vec<(UserId, String)>,
}

impl DmReport {
    /// True when no send failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sends a fixed message to every target and reports to the administrators.
pub struct DirectMessageTask {
    messenger: DirectMessenger,
    notifier: AdminNotifier,
    targets: Arc<[UserId]>,
    message: String,
}

impl DirectMessageTask {
    /// Create the task from configuration.
    pub fn new(messenger: DirectMessenger, notifier: AdminNotifier, config: &DirectMessageConfig) -> Self {
        Self {
            messenger,
            notifier,
            targets: config.user_ids.clone().into(),
            message: config.message.clone(),
        }
    }

    /// Run one pass.
    ///
    /// Each failure is reported to the administrators as it happens. A pass
    /// without failures ends with a single "no errors" report; a pass with
    /// failures sends nothing more.
    #[instrument(skip(self), fields(targets = self.targets.len()))]
    pub async fn run_once(&self) -> DmReport {
        let mut report = DmReport::default();

        for target in self.targets.iter().copied() {
            match self.messenger.deliver(target, &self.message).await {
                Ok(Delivery::Delivered(recipient)) => {
                    info!(user_id = %target, name = %recipient.name(), "DM sent");
                    report.delivered.push(target);
                }
                Ok(Delivery::Unresolved) => {
                    warn!(user_id = %target, "DM target not found");
                    report.unresolved.push(target);
                }
                Err(e) => {
                    let detail = format!("Failed to send DM to user {}: {}", target, e.kind());
                    error!(user_id = %target, error = %e, "DM failed");
                    self.notifier
                        .notify(&format!("⚠️ Error occurred:\n{}", detail))
                        .await;
                    report.failures.push((target, detail));
                }
            }
        }

        if report.is_clean() {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            self.notifier
                .notify(&format!("✅ No errors in the last hour.\nRun at: {}", now))
                .await;
        }

        report
    }
}
