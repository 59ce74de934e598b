//! Logging initialisation.

use concierge_core::LoggingConfig;
use concierge_error::{ConciergeResult, ConfigError, ConfigErrorKind};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. The fmt layer is text or JSON
/// according to `logging.json`.
///
/// # Errors
///
/// Returns error if the configured level is not a valid filter directive or
/// a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> ConciergeResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            ConfigError::new(ConfigErrorKind::LogFilter(format!(
                "invalid filter '{}': {}",
                config.level, e
            )))
        })?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(ConfigErrorKind::LogFilter(e.to_string())))?;

    Ok(())
}
