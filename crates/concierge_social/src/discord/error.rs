//! Discord-specific error types.
//!
//! Serenity errors are classified here: an HTTP 404 from the REST API means
//! the looked-up entity does not exist, everything else is a failure.

use concierge_error::{ChatError, ChatErrorKind};
use derive_getters::Getters;
use serenity::http::HttpError;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Entity lookup failed.
    #[display("Lookup failed: {_0}")]
    LookupFailed(String),

    /// Message failed to send.
    #[display("Message send failed: {_0}")]
    MessageSendFailed(String),

    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use concierge_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::ConnectionFailed("closed".into()));
    /// assert_eq!(err.kind(), &DiscordErrorKind::ConnectionFailed("closed".into()));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<DiscordError> for ChatError {
    #[track_caller]
    fn from(err: DiscordError) -> Self {
        let kind = match err.kind {
            DiscordErrorKind::ConnectionFailed(reason) => ChatErrorKind::ConnectionFailed(reason),
            DiscordErrorKind::MessageSendFailed(reason) => ChatErrorKind::SendFailed(reason),
            DiscordErrorKind::LookupFailed(reason) => ChatErrorKind::Lookup(reason),
        };
        ChatError::new(kind)
    }
}

/// True when Serenity reports that the requested entity does not exist.
pub fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Map a REST lookup result to `Ok(None)` on 404.
pub(crate) fn found<T>(result: serenity::Result<T>) -> DiscordResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_not_found(&e) => Ok(None),
        Err(e) => Err(DiscordError::new(DiscordErrorKind::LookupFailed(
            e.to_string(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_failure_maps_to_chat_send_failure() {
        let err = DiscordError::new(DiscordErrorKind::MessageSendFailed("50007".into()));
        let chat: ChatError = err.into();
        assert_eq!(chat.kind(), &ChatErrorKind::SendFailed("50007".into()));
    }

    #[test]
    fn test_connection_failure_maps_to_chat_connection_failure() {
        let err = DiscordError::new(DiscordErrorKind::ConnectionFailed("gateway".into()));
        let chat: ChatError = err.into();
        assert_eq!(chat.kind(), &ChatErrorKind::ConnectionFailed("gateway".into()));
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        let err = serenity::Error::Other("shard died");
        assert!(!is_not_found(&err));
        assert!(found::<()>(Err(err)).is_err());
    }

    #[test]
    fn test_found_wraps_success() {
        assert_eq!(found(Ok(5)).map_err(|e| e.to_string()), Ok(Some(5)));
    }
}
