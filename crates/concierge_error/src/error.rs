//! Top-level error wrapper types.

use crate::{ChatError, ConfigError, HttpError, MonitorError, SchedulerError};

/// Every error the bot can raise, by concern.
///
/// # Examples
///
/// ```
/// use concierge_error::{ConciergeError, HttpError, HttpErrorKind};
///
/// let http_err = HttpError::new(HttpErrorKind::Serve("Connection failed".into()));
/// let err: ConciergeError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ConciergeErrorKind {
    /// Configuration or credential error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP server or client error
    #[from(HttpError)]
    Http(HttpError),
    /// Chat platform error
    #[from(ChatError)]
    Chat(ChatError),
    /// Log monitor error
    #[from(MonitorError)]
    Monitor(MonitorError),
    /// Scheduler error
    #[from(SchedulerError)]
    Scheduler(SchedulerError),
}

/// Concierge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use concierge_error::{ConciergeResult, ConfigError, ConfigErrorKind};
///
/// fn load() -> ConciergeResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::MissingToken))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Concierge Error: {}", _0)]
pub struct ConciergeError(Box<ConciergeErrorKind>);

impl ConciergeError {
    /// Create a new error from a kind.
    pub fn new(kind: ConciergeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConciergeErrorKind {
        &self.0
    }
}

impl<T> From<T> for ConciergeError
where
    T: Into<ConciergeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Concierge operations.
pub type ConciergeResult<T> = std::result::Result<T, ConciergeError>;
