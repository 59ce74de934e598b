//! Tests for reconnect supervision and the event error boundary.

mod common;

use async_trait::async_trait;
use common::{ADMIN_A, ADMIN_B, MockPlatform, notifier_for};
use concierge_core::{ConnectionState, ConnectionSupervisor, Connector};
use concierge_error::{ChatError, ChatErrorKind, ChatResult, ConciergeError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Fails a fixed number of times, then ends cleanly.
struct FlakyConnector {
    failures: u32,
    calls: AtomicU32,
}

impl FlakyConnector {
    fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Connector for FlakyConnector {
    async fn connect(&self) -> ChatResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(ChatError::new(ChatErrorKind::ConnectionFailed(
                "gateway closed".to_string(),
            )))
        } else {
            Ok(())
        }
    }
}

fn supervisor(platform: &Arc<MockPlatform>) -> ConnectionSupervisor {
    let (_, notifier) = notifier_for(Arc::clone(platform));
    ConnectionSupervisor::new(Duration::from_secs(5), notifier)
}

#[tokio::test(start_paused = true)]
async fn test_run_retries_until_session_ends_cleanly() {
    let platform = Arc::new(MockPlatform::new());
    let supervisor = supervisor(&platform);
    let connector = FlakyConnector::new(3);

    let started = tokio::time::Instant::now();
    let attempts = supervisor.run(&connector).await;

    assert_eq!(attempts, 4);
    assert_eq!(connector.calls.load(Ordering::SeqCst), 4);
    assert!(started.elapsed() >= Duration::from_secs(15));
    assert_eq!(supervisor.state(), ConnectionState::Disconnected);
}

#[tokio::test(start_paused = true)]
async fn test_run_clean_session_is_single_attempt() {
    let platform = Arc::new(MockPlatform::new());
    let supervisor = supervisor(&platform);

    assert_eq!(supervisor.run(&FlakyConnector::new(0)).await, 1);
}

#[test]
fn test_state_transitions() {
    let platform = Arc::new(MockPlatform::new());
    let supervisor = supervisor(&platform);

    assert_eq!(supervisor.state(), ConnectionState::Disconnected);
    supervisor.set_state(ConnectionState::Connected);
    assert_eq!(supervisor.state(), ConnectionState::Connected);
    supervisor.set_state(ConnectionState::Reconnecting);
    assert_eq!(supervisor.state().to_string(), "reconnecting");
}

#[tokio::test]
async fn test_intercept_passes_through_success() {
    let platform = Arc::new(MockPlatform::new());
    let supervisor = supervisor(&platform);

    let value = supervisor
        .intercept("ready", "bot", async { Ok::<_, ConciergeError>(7) })
        .await;

    assert_eq!(value, Some(7));
    assert!(platform.direct_messages().is_empty());
}

#[tokio::test]
async fn test_intercept_reports_errors_to_admins() {
    let platform = Arc::new(MockPlatform::new());
    let supervisor = supervisor(&platform);

    let value: Option<()> = supervisor
        .intercept("member_joined", "guild_id=1, user_id=2", async {
            Err::<(), ConciergeError>(
                ChatError::new(ChatErrorKind::SendFailed("boom".to_string())).into(),
            )
        })
        .await;

    assert!(value.is_none());
    for admin in [ADMIN_A, ADMIN_B] {
        let reports = platform.direct_messages_to(admin);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].starts_with("⚠️ Error in event 'member_joined' (guild_id=1, user_id=2):"));
        assert!(reports[0].contains("boom"));
    }
}

#[tokio::test]
async fn test_intercept_catches_panics() {
    let platform = Arc::new(MockPlatform::new());
    let supervisor = supervisor(&platform);

    let explode = true;
    let value = supervisor
        .intercept("ready", "bot", async move {
            if explode {
                panic!("handler exploded");
            }
            Ok::<(), ConciergeError>(())
        })
        .await;

    assert!(value.is_none());
    let reports = platform.direct_messages_to(ADMIN_A);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].contains("panic: handler exploded"));
}
