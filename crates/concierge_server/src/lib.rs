//! Liveness HTTP surface for the Concierge bot.
//!
//! Hosting platforms suspend idle services, so the bot exposes `GET /health`
//! (and optionally `GET /`) and pings its own public URL on a fixed interval.
//! Neither has any role in the bot's chat behaviour.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod keep_alive;
mod serve;

pub use api::{ApiState, HealthLog, create_router, logs_request};
pub use keep_alive::KeepAlive;
pub use serve::{bind, serve};
