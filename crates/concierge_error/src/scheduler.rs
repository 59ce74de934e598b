//! Interval scheduler errors.

/// Specific scheduler error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SchedulerErrorKind {
    /// Period must be non-zero.
    #[display("Invalid period for task '{}'", _0)]
    InvalidPeriod(String),
}

/// Scheduler error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scheduler Error: {} at line {} in {}", kind, line, file)]
pub struct SchedulerError {
    kind: SchedulerErrorKind,
    line: u32,
    file: &'static str,
}

impl SchedulerError {
    /// Create a new scheduler error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SchedulerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SchedulerErrorKind {
        &self.kind
    }
}
