//! Chat platform integrations for the Concierge bot.
//!
//! Each platform lives in its own feature-gated submodule and provides:
//! - A platform-specific error type convertible into `ChatError`
//! - An implementation of `concierge_core::ChatPlatform`
//! - An event handler forwarding to `concierge_core::EventDispatcher`
//! - A client implementing `concierge_core::Connector` for the supervisor
//!
//! # Platform Support
//!
//! - `discord` - Discord bot integration (requires `discord` feature, on by default)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "discord")]
mod discord;

#[cfg(feature = "discord")]
pub use discord::{
    ConciergeHandler, DiscordBot, DiscordError, DiscordErrorKind, DiscordPlatform, DiscordResult,
    connection_state, gateway_intents, is_not_found,
};
