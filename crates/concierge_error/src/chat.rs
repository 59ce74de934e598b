//! Chat platform error types.
//!
//! Lookups that find nothing are not errors: platforms return `Ok(None)` and
//! callers log a configuration warning. These kinds cover transport failures.

/// Chat platform error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChatErrorKind {
    /// Lookup request failed for a reason other than "not found".
    #[display("Lookup failed: {_0}")]
    Lookup(String),

    /// Message failed to send.
    #[display("Message send failed: {_0}")]
    SendFailed(String),

    /// Gateway session could not be established or ended with an error.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),
}

/// Chat platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chat Error: {} at line {} in {}", kind, line, file)]
pub struct ChatError {
    kind: ChatErrorKind,
    line: u32,
    file: &'static str,
}

impl ChatError {
    /// Create a new ChatError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use concierge_error::{ChatError, ChatErrorKind};
    ///
    /// let err = ChatError::new(ChatErrorKind::SendFailed("Missing Access".into()));
    /// assert!(err.to_string().contains("Missing Access"));
    /// ```
    #[track_caller]
    pub fn new(kind: ChatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChatErrorKind {
        &self.kind
    }
}

/// Result type for chat platform operations.
pub type ChatResult<T> = Result<T, ChatError>;
