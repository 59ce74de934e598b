//! Liveness server and self-ping errors.

/// HTTP error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// The listen address could not be bound.
    #[display("Failed to bind {address}: {reason}")]
    Bind {
        /// Requested `host:port`
        address: String,
        /// I/O failure
        reason: String,
    },

    /// The server failed while running.
    #[display("Liveness server error: {_0}")]
    Serve(String),

    /// The self-ping request could not be completed.
    #[display("Failed to ping {url}: {reason}")]
    Ping {
        /// Pinged URL
        url: String,
        /// Transport failure
        reason: String,
    },
}

/// HTTP error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    kind: HttpErrorKind,
    line: u32,
    file: &'static str,
}

impl HttpError {
    /// Create a new HTTP error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use concierge_error::{HttpError, HttpErrorKind};
    ///
    /// let err = HttpError::new(HttpErrorKind::Serve("connection reset".into()));
    /// assert!(matches!(err.kind(), HttpErrorKind::Serve(_)));
    /// ```
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HttpErrorKind {
        &self.kind
    }
}
