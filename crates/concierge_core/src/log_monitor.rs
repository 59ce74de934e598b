//! Log artifact monitoring.
//!
//! Each poll re-reads the whole file and counts lines matching the error
//! pattern. Error reports are rate limited by a cooldown; an all-clear status
//! goes out on its own fixed window whatever the error state.

use crate::{AdminNotifier, LogMonitorConfig};
use concierge_error::{MonitorError, MonitorErrorKind};
use derive_getters::Getters;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Mutable monitor state, guarded by the monitor.
#[derive(Debug, Clone, Getters)]
pub struct MonitorState {
    /// When the last all-clear report went out (or when monitoring started)
    last_all_clear: Instant,
    /// When the last error report went out
    last_error_report: Option<Instant>,
    /// Error lines seen by the latest scan and not yet reported
    error_tally: usize,
    /// Whether the latest scan found unreported errors
    error_detected: bool,
}

/// What a scan found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The artifact could not be read; nothing else happened.
    Skipped,
    /// No error lines.
    Clean,
    /// Errors found and reported.
    Reported {
        /// Matching lines
        errors: usize,
    },
    /// Errors found but still inside the cooldown.
    Suppressed {
        /// Matching lines
        errors: usize,
    },
}

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Error scan result
    pub scan: ScanOutcome,
    /// Whether an all-clear report was sent
    pub all_clear_sent: bool,
}

/// Polls a log file for error markers and reports to administrators.
pub struct LogMonitor {
    path: PathBuf,
    pattern: Regex,
    error_cooldown: Duration,
    all_clear_interval: Duration,
    notifier: AdminNotifier,
    state: Mutex<MonitorState>,
}

impl LogMonitor {
    /// Create a monitor that starts its all-clear window now.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is not a valid regular expression.
    pub fn new(config: &LogMonitorConfig, notifier: AdminNotifier) -> Result<Self, MonitorError> {
        Self::started_at(config, notifier, Instant::now())
    }

    /// Create a monitor whose all-clear window starts at `started`.
    pub fn started_at(
        config: &LogMonitorConfig,
        notifier: AdminNotifier,
        started: Instant,
    ) -> Result<Self, MonitorError> {
        let pattern = RegexBuilder::new(&config.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                MonitorError::new(MonitorErrorKind::InvalidPattern {
                    pattern: config.pattern.clone(),
                    reason: e.to_string(),
                })
            })?;

        Ok(Self {
            path: config.path.clone(),
            pattern,
            error_cooldown: config.error_cooldown(),
            all_clear_interval: config.all_clear_interval(),
            notifier,
            state: Mutex::new(MonitorState {
                last_all_clear: started,
                last_error_report: None,
                error_tally: 0,
                error_detected: false,
            }),
        })
    }

    /// The monitored artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> MonitorState {
        self.state.lock().clone()
    }

    /// Count matching lines in the artifact.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a stray binary line
    /// never hides the error lines around it.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing or unreadable.
    pub async fn count_errors(&self) -> Result<usize, MonitorError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            let path = self.path.display().to_string();
            if e.kind() == std::io::ErrorKind::NotFound {
                MonitorError::new(MonitorErrorKind::NotFound(path))
            } else {
                MonitorError::new(MonitorErrorKind::Read {
                    path,
                    reason: e.to_string(),
                })
            }
        })?;

        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| self.pattern.is_match(line))
            .count())
    }

    /// Run one poll cycle now.
    pub async fn poll(&self) -> PollReport {
        self.poll_at(Instant::now()).await
    }

    /// Run one poll cycle as if the current time were `now`.
    #[instrument(skip(self, now), fields(path = %self.path.display()))]
    pub async fn poll_at(&self, now: Instant) -> PollReport {
        let scanned = self.count_errors().await;

        let mut messages = Vec::new();
        let report = {
            let mut state = self.state.lock();

            let scan = match scanned {
                Err(e) => {
                    warn!(error = %e, "Log scan skipped");
                    ScanOutcome::Skipped
                }
                Ok(0) => {
                    state.error_tally = 0;
                    state.error_detected = false;
                    ScanOutcome::Clean
                }
                Ok(errors) => {
                    state.error_tally = errors;
                    state.error_detected = true;

                    let cooled_down = state
                        .last_error_report
                        .is_none_or(|last| now.saturating_duration_since(last) >= self.error_cooldown);

                    if cooled_down {
                        messages.push(format!(
                            "⚠️ {} errors detected in {}",
                            errors,
                            self.path.display()
                        ));
                        state.last_error_report = Some(now);
                        state.error_tally = 0;
                        state.error_detected = false;
                        ScanOutcome::Reported { errors }
                    } else {
                        debug!(errors, "Errors found inside cooldown; not reporting");
                        ScanOutcome::Suppressed { errors }
                    }
                }
            };

            let all_clear_sent =
                now.saturating_duration_since(state.last_all_clear) >= self.all_clear_interval;
            if all_clear_sent {
                let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                messages.push(format!("✅ Log monitor running normally.\nChecked at: {}", stamp));
                state.last_all_clear = now;
            }

            PollReport {
                scan,
                all_clear_sent,
            }
        };

        for message in &messages {
            self.notifier.notify(message).await;
        }

        if let ScanOutcome::Reported { errors } = report.scan {
            info!(errors, "Error report sent");
        }

        report
    }
}
