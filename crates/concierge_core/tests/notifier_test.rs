//! Tests for administrator notifications.

mod common;

use common::{ADMIN_A, ADMIN_B, MockPlatform, notifier_for};
use concierge_core::{AdminNotifier, Delivery, DirectMessenger, UserId};
use std::sync::Arc;

#[tokio::test]
async fn test_notify_reaches_every_admin() {
    let platform = Arc::new(MockPlatform::new());
    let (_, notifier) = notifier_for(Arc::clone(&platform));

    notifier.notify("status").await;

    assert_eq!(platform.direct_messages_to(ADMIN_A), vec!["status"]);
    assert_eq!(platform.direct_messages_to(ADMIN_B), vec!["status"]);
}

#[tokio::test]
async fn test_unresolved_admin_does_not_stop_others() {
    let platform = Arc::new(MockPlatform::new().with_missing_user(ADMIN_A));
    let (_, notifier) = notifier_for(Arc::clone(&platform));

    notifier.notify("status").await;

    assert!(platform.direct_messages_to(ADMIN_A).is_empty());
    assert_eq!(platform.direct_messages_to(ADMIN_B), vec!["status"]);
}

#[tokio::test]
async fn test_lookup_and_send_failures_do_not_stop_others() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_unreachable_user(1)
            .with_failing_send(2),
    );
    let messenger = DirectMessenger::new(platform.clone());
    let notifier = AdminNotifier::new(messenger, vec![UserId(1), UserId(2), UserId(3)]);

    notifier.notify("disk full").await;

    assert_eq!(platform.direct_messages(), vec![(UserId(3), "disk full".to_string())]);
}

#[tokio::test]
async fn test_deliver_distinguishes_unresolved_from_failure() {
    let platform = Arc::new(MockPlatform::new().with_missing_user(7).with_failing_send(8));
    let messenger = DirectMessenger::new(platform.clone());

    assert_eq!(
        messenger.deliver(UserId(7), "hi").await.expect("Lookup succeeds"),
        Delivery::Unresolved
    );
    assert!(messenger.deliver(UserId(8), "hi").await.is_err());
    assert!(matches!(
        messenger.deliver(UserId(9), "hi").await,
        Ok(Delivery::Delivered(_))
    ));
}
