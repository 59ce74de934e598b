//! Discord integration for Concierge.
//!
//! Built on Serenity. The layers are:
//! - **error**: Discord error types and the "not found" classification
//! - **platform**: [`DiscordPlatform`], the REST side of `ChatPlatform`
//! - **handler**: [`ConciergeHandler`], Serenity's `EventHandler` forwarding to the dispatcher
//! - **client**: [`DiscordBot`], one gateway session per `connect` call
//!
//! # Usage
//!
//! ```rust,ignore
//! use concierge_social::{DiscordBot, DiscordPlatform};
//!
//! let platform = Arc::new(DiscordPlatform::new(&token));
//! let bot = DiscordBot::new(token, dispatcher);
//! supervisor.run(&bot).await;
//! ```

mod client;
mod error;
mod handler;
mod platform;

pub use client::{DiscordBot, gateway_intents};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult, is_not_found};
pub use handler::{ConciergeHandler, connection_state};
pub use platform::DiscordPlatform;
