//! Log monitor error types.

/// Log monitor error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MonitorErrorKind {
    /// The log artifact does not exist.
    #[display("Log file not found: {_0}")]
    NotFound(String),

    /// The log artifact exists but could not be read.
    #[display("Failed to read log file {path}: {reason}")]
    Read {
        /// Path of the artifact
        path: String,
        /// Failure detail
        reason: String,
    },

    /// The error-marker pattern is not a valid regular expression.
    #[display("Invalid error pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },
}

/// Log monitor error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Monitor Error: {} at line {} in {}", kind, line, file)]
pub struct MonitorError {
    kind: MonitorErrorKind,
    line: u32,
    file: &'static str,
}

impl MonitorError {
    /// Create a new monitor error with caller location tracking.
    #[track_caller]
    pub fn new(kind: MonitorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MonitorErrorKind {
        &self.kind
    }
}
