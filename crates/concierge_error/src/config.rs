//! Configuration and startup error types.

/// Configuration error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The bot credential is absent or blank.
    #[display("DISCORD_TOKEN is not set")]
    MissingToken,

    /// `PORT` is not a valid port number.
    #[display("Invalid PORT '{value}': {reason}")]
    InvalidPort {
        /// Raw environment value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// A configuration source could not be read.
    #[display("Failed to load configuration: {_0}")]
    Load(String),

    /// The merged configuration did not match the expected shape.
    #[display("Failed to parse configuration: {_0}")]
    Parse(String),

    /// The log filter directive is invalid or a subscriber is already set.
    #[display("Failed to initialise logging: {_0}")]
    LogFilter(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::MissingToken);
    /// assert_eq!(err.kind(), &ConfigErrorKind::MissingToken);
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
