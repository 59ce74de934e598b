//! Connection supervision and the event error boundary.
//!
//! The supervisor tracks the gateway connection state, restarts a session
//! that ended with an error after a fixed delay (no backoff growth, no retry
//! limit), and wraps every event handler so failures and panics are logged
//! and forwarded to administrators instead of reaching the runtime.

use crate::AdminNotifier;
use async_trait::async_trait;
use concierge_error::{ChatResult, ConciergeResult};
use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{error, info, instrument, warn};

/// Gateway connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConnectionState {
    /// Receiving events.
    #[display("connected")]
    Connected,
    /// Session lost.
    #[display("disconnected")]
    Disconnected,
    /// A new session is being established.
    #[display("reconnecting")]
    Reconnecting,
}

/// Something that runs one chat session.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connect and run until the session ends.
    ///
    /// `Ok(())` means the session was shut down deliberately.
    ///
    /// # Errors
    ///
    /// Returns error if the session could not be established or dropped.
    async fn connect(&self) -> ChatResult<()>;
}

/// Tracks connection state and guards event handlers.
pub struct ConnectionSupervisor {
    state: Mutex<ConnectionState>,
    retry_delay: Duration,
    notifier: AdminNotifier,
}

impl ConnectionSupervisor {
    /// Create a supervisor with a fixed retry delay.
    pub fn new(retry_delay: Duration, notifier: AdminNotifier) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            retry_delay,
            notifier,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Record a state change reported by the chat runtime.
    pub fn set_state(&self, next: ConnectionState) {
        let previous = std::mem::replace(&mut *self.state.lock(), next);
        if previous != next {
            match next {
                ConnectionState::Connected => info!(%previous, "Connected to chat gateway"),
                ConnectionState::Disconnected => warn!(%previous, "Disconnected from chat gateway"),
                ConnectionState::Reconnecting => info!(%previous, "Reconnecting to chat gateway"),
            }
        }
    }

    /// Run sessions until one ends cleanly, retrying failures forever.
    ///
    /// Returns the number of attempts made.
    #[instrument(skip_all, fields(delay = ?self.retry_delay))]
    pub async fn run<C>(&self, connector: &C) -> u32
    where
        C: Connector + ?Sized,
    {
        let attempts = AtomicU32::new(0);
        let strategy = FixedInterval::from_millis(self.retry_delay.as_millis() as u64);

        let this = self;
        let counter = &attempts;
        let result = Retry::spawn(strategy, move || async move {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt > 1 {
                this.set_state(ConnectionState::Reconnecting);
            }

            match connector.connect().await {
                Ok(()) => Ok(()),
                Err(e) => {
                    this.set_state(ConnectionState::Disconnected);
                    error!(attempt, error = %e, "Connection attempt failed; retrying");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
            }
        })
        .await;

        let attempts = attempts.load(Ordering::SeqCst);
        match result {
            Ok(()) => info!(attempts, "Chat session ended"),
            Err(e) => error!(attempts, error = %e, "Gave up reconnecting"),
        }
        self.set_state(ConnectionState::Disconnected);
        attempts
    }

    /// Run an event handler inside the error boundary.
    ///
    /// Errors and panics are logged with the event name and arguments and
    /// forwarded to the administrators; `None` is returned in that case.
    pub async fn intercept<T, F>(&self, event: &str, args: &str, handler: F) -> Option<T>
    where
        F: Future<Output = ConciergeResult<T>>,
    {
        let failure = match AssertUnwindSafe(handler).catch_unwind().await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(e)) => e.to_string(),
            Err(panic) => format!("panic: {}", panic_message(panic.as_ref())),
        };

        error!(event, args, error = %failure, "Event handler failed");
        self.notifier
            .notify(&format!(
                "⚠️ Error in event '{}' ({}):\n{}",
                event, args, failure
            ))
            .await;
        None
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
