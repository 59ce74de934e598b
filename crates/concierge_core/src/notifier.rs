//! Administrator notifications.

use crate::{Delivery, DirectMessenger, UserId};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Best-effort broadcast to the administrator allowlist.
///
/// Failures for one administrator are logged and never stop delivery to the
/// rest. Nothing is returned: callers fire and forget.
#[derive(Clone)]
pub struct AdminNotifier {
    messenger: DirectMessenger,
    admins: Arc<[UserId]>,
}

impl AdminNotifier {
    /// Create a notifier for a fixed list of administrators.
    pub fn new(messenger: DirectMessenger, admins: impl Into<Arc<[UserId]>>) -> Self {
        Self {
            messenger,
            admins: admins.into(),
        }
    }

    /// Administrators in notification order.
    pub fn admins(&self) -> &[UserId] {
        &self.admins
    }

    /// Send `message` to every administrator.
    #[instrument(skip(self, message), fields(admins = self.admins.len()))]
    pub async fn notify(&self, message: &str) {
        for admin in self.admins.iter().copied() {
            match self.messenger.deliver(admin, message).await {
                Ok(Delivery::Delivered(_)) => {
                    info!(admin_id = %admin, "Administrator notified");
                }
                Ok(Delivery::Unresolved) => {
                    warn!(admin_id = %admin, "Administrator not found; check admins.user_ids");
                }
                Err(e) => {
                    error!(admin_id = %admin, error = %e, "Failed to notify administrator");
                }
            }
        }
    }
}
