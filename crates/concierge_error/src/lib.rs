//! Error types for the Concierge bot.
//!
//! This crate provides the foundation error types used throughout the Concierge workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use concierge_error::{ConciergeResult, HttpError, HttpErrorKind};
//!
//! fn ping() -> ConciergeResult<u16> {
//!     Err(HttpError::new(HttpErrorKind::Serve("Connection refused".into())))?
//! }
//!
//! assert!(ping().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod config;
mod error;
mod http;
mod monitor;
mod scheduler;

pub use chat::{ChatError, ChatErrorKind, ChatResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{ConciergeError, ConciergeErrorKind, ConciergeResult};
pub use http::{HttpError, HttpErrorKind};
pub use monitor::{MonitorError, MonitorErrorKind};
pub use scheduler::{SchedulerError, SchedulerErrorKind};
