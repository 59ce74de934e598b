//! Tests for log scanning, error cooldown and all-clear reports.

mod common;

use common::{ADMIN_A, MockPlatform, notifier_for};
use concierge_core::{LogMonitor, LogMonitorConfig, ScanOutcome};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

fn monitor_config(path: &std::path::Path) -> LogMonitorConfig {
    LogMonitorConfig {
        enabled: true,
        path: path.to_path_buf(),
        pattern: "error".to_string(),
        poll_secs: 60,
        error_cooldown_secs: 300,
        all_clear_secs: 3600,
    }
}

fn log_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write log line");
    }
    file
}

#[tokio::test]
async fn test_errors_reported_once_within_cooldown() {
    let file = log_file(&[
        "INFO started",
        "ERROR first",
        "warning: disk",
        "Error second",
        "an error occurred",
    ]);
    let platform = Arc::new(MockPlatform::new());
    let (_, notifier) = notifier_for(Arc::clone(&platform));
    let start = Instant::now();
    let monitor = LogMonitor::started_at(&monitor_config(file.path()), notifier, start)
        .expect("Valid pattern");

    let first = monitor.poll_at(start + Duration::from_secs(60)).await;
    assert_eq!(first.scan, ScanOutcome::Reported { errors: 3 });
    assert!(!first.all_clear_sent);
    assert_eq!(*monitor.state().error_tally(), 0);

    let second = monitor.poll_at(start + Duration::from_secs(120)).await;
    assert_eq!(second.scan, ScanOutcome::Suppressed { errors: 3 });
    assert!(*monitor.state().error_detected());

    let reports = platform.direct_messages_to(ADMIN_A);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("⚠️ 3 errors detected in"));

    let third = monitor.poll_at(start + Duration::from_secs(400)).await;
    assert_eq!(third.scan, ScanOutcome::Reported { errors: 3 });
    assert_eq!(platform.direct_messages_to(ADMIN_A).len(), 2);
}

#[tokio::test]
async fn test_invalid_utf8_does_not_hide_errors() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"ERROR one\nERROR two\nERROR three\nbinary \xff\xfe junk\n")
        .expect("Failed to write log bytes");
    let platform = Arc::new(MockPlatform::new());
    let (_, notifier) = notifier_for(Arc::clone(&platform));
    let start = Instant::now();
    let monitor = LogMonitor::started_at(&monitor_config(file.path()), notifier, start)
        .expect("Valid pattern");

    let report = monitor.poll_at(start + Duration::from_secs(60)).await;

    assert_eq!(report.scan, ScanOutcome::Reported { errors: 3 });
    let reports = platform.direct_messages_to(ADMIN_A);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("⚠️ 3 errors detected in"));
}

#[tokio::test]
async fn test_missing_file_is_skipped() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let platform = Arc::new(MockPlatform::new());
    let (_, notifier) = notifier_for(Arc::clone(&platform));
    let start = Instant::now();
    let monitor = LogMonitor::started_at(
        &monitor_config(&dir.path().join("absent.log")),
        notifier,
        start,
    )
    .expect("Valid pattern");

    let report = monitor.poll_at(start + Duration::from_secs(60)).await;
    assert_eq!(report.scan, ScanOutcome::Skipped);
    assert!(!report.all_clear_sent);
    assert!(platform.direct_messages().is_empty());
}

#[tokio::test]
async fn test_all_clear_after_window() {
    let file = log_file(&["INFO all good"]);
    let platform = Arc::new(MockPlatform::new());
    let (_, notifier) = notifier_for(Arc::clone(&platform));
    let start = Instant::now();
    let monitor = LogMonitor::started_at(&monitor_config(file.path()), notifier, start)
        .expect("Valid pattern");

    let early = monitor.poll_at(start + Duration::from_secs(60)).await;
    assert_eq!(early.scan, ScanOutcome::Clean);
    assert!(!early.all_clear_sent);

    let due = monitor.poll_at(start + Duration::from_secs(3600)).await;
    assert!(due.all_clear_sent);

    let again = monitor.poll_at(start + Duration::from_secs(3660)).await;
    assert!(!again.all_clear_sent);

    let reports = platform.direct_messages_to(ADMIN_A);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("✅ Log monitor running normally."));
}

#[test]
fn test_invalid_pattern_rejected() {
    let platform = Arc::new(MockPlatform::new());
    let (_, notifier) = notifier_for(platform);
    let config = LogMonitorConfig {
        pattern: "(unclosed".to_string(),
        ..LogMonitorConfig::default()
    };
    assert!(LogMonitor::new(&config, notifier).is_err());
}
