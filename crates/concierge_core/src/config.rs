//! Bot configuration.
//!
//! Configuration is layered with the `config` crate. Sources in order of
//! precedence (later sources override earlier):
//! 1. Bundled defaults (`concierge.toml` shipped with the workspace)
//! 2. User config in home directory (`~/.config/concierge/concierge.toml`)
//! 3. User config in current directory (`./concierge.toml`)
//! 4. An explicit file passed by the caller
//! 5. `PORT` from the environment, overriding `server.port`
//!
//! The bot credential is deliberately not part of this configuration.

use crate::{ChannelId, RoleId, UserId};
use concierge_error::{ConciergeError, ConciergeResult, ConfigError, ConfigErrorKind};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Placeholder in the welcome template replaced by the role mention.
pub const ROLE_PLACEHOLDER: &str = "{role}";

const DEFAULT_WELCOME_TEMPLATE: &str = "Hello {role}! You should see \"There are a few more \
steps before you can start chatting.\" Press \"Got it\" to agree to the rules, then verify \
yourself at https://discord.com/channels/1165775639798878288/1165775640918773843 and come \
chat with everyone!";

const DEFAULT_DM_MESSAGE: &str = "This is the hourly DM test message.";

/// Top-level bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConciergeConfig {
    /// Welcome greeting settings
    #[serde(default)]
    pub welcome: WelcomeConfig,
    /// Administrator recipients
    #[serde(default)]
    pub admins: AdminConfig,
    /// Periodic direct-message settings
    #[serde(default)]
    pub direct_messages: DirectMessageConfig,
    /// Log monitor settings
    #[serde(default)]
    pub log_monitor: LogMonitorConfig,
    /// Liveness server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Self-ping settings
    #[serde(default)]
    pub keep_alive: KeepAliveConfig,
    /// Gateway reconnect settings
    #[serde(default)]
    pub reconnect: ReconnectConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConciergeConfig {
    /// Load configuration with precedence: explicit file > current dir > home dir > bundled defaults.
    ///
    /// `PORT` from the environment is applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, any source fails to
    /// parse, or `PORT` is not a valid port number.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> ConciergeResult<Self> {
        debug!("Loading configuration");

        const DEFAULT_CONFIG: &str = include_str!("../../../concierge.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/concierge/concierge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("concierge").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(PathBuf::from(path)).required(true));
        }

        let mut config: Self = builder
            .build()
            .map_err(|e| {
                ConciergeError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                ConciergeError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })?;

        config.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, filling gaps with defaults.
    pub fn from_toml_str(toml: &str) -> ConciergeResult<Self> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| {
                ConciergeError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                ConciergeError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })
    }

    /// Apply a `PORT` override to the liveness server.
    ///
    /// Empty values are ignored.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> ConciergeResult<()> {
        let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(());
        };

        let parsed = raw.parse::<u16>().map_err(|e| {
            ConciergeError::from(ConfigError::new(ConfigErrorKind::InvalidPort {
                value: raw.to_string(),
                reason: e.to_string(),
            }))
        })?;

        debug!(port = parsed, "PORT override applied");
        self.server.port = parsed;
        Ok(())
    }

    /// Check the configuration for suspicious values.
    ///
    /// Returns human-readable warnings; an empty list means nothing looked off.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.admins.user_ids.is_empty() {
            warnings.push("admins.user_ids is empty; error reports will go nowhere".to_string());
        }
        if self.direct_messages.user_ids.is_empty() {
            warnings.push("direct_messages.user_ids is empty; the DM task has no targets".to_string());
        }
        if !self.welcome.template.contains(ROLE_PLACEHOLDER) {
            warnings.push(format!(
                "welcome.template has no {} placeholder; the role will not be mentioned",
                ROLE_PLACEHOLDER
            ));
        }
        for (name, secs) in [
            ("direct_messages.interval_secs", self.direct_messages.interval_secs),
            ("log_monitor.poll_secs", self.log_monitor.poll_secs),
            ("keep_alive.interval_secs", self.keep_alive.interval_secs),
        ] {
            if secs == 0 {
                warnings.push(format!("{} is 0; clamped to 1 second", name));
            }
        }
        if self.reconnect.delay_secs == 0 {
            warnings.push("reconnect.delay_secs is 0; clamped to 1 second".to_string());
        }
        for (name, ids) in [
            ("admins.user_ids", &self.admins.user_ids),
            ("direct_messages.user_ids", &self.direct_messages.user_ids),
        ] {
            if ids.iter().any(|id| id.get() == 0) {
                warnings.push(format!("{} contains 0, which is not a valid user; it will be skipped", name));
            }
        }
        if self.welcome.channel_id.get() == 0 || self.welcome.role_id.get() == 0 {
            warnings.push("welcome.channel_id or welcome.role_id is 0; greetings will be skipped".to_string());
        }
        if self.keep_alive.enabled && self.keep_alive.url.is_empty() {
            warnings.push("keep_alive.enabled is set but keep_alive.url is empty".to_string());
        }

        warnings
    }
}

/// Welcome greeting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeConfig {
    /// Channel the greeting is posted to
    pub channel_id: ChannelId,
    /// Role mentioned in the greeting
    pub role_id: RoleId,
    /// Greeting text; `{role}` is replaced by the role mention
    #[serde(default = "default_welcome_template")]
    pub template: String,
    /// Seconds during which further greetings are suppressed
    #[serde(default = "default_suppression_secs")]
    pub suppression_secs: u64,
}

impl WelcomeConfig {
    /// Suppression window as a duration.
    pub fn suppression_window(&self) -> Duration {
        Duration::from_secs(self.suppression_secs)
    }

    /// Render the greeting for a role mention.
    pub fn render(&self, role_mention: &str) -> String {
        self.template.replace(ROLE_PLACEHOLDER, role_mention)
    }
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            channel_id: ChannelId(1165799413558542446),
            role_id: RoleId(1165785520593436764),
            template: default_welcome_template(),
            suppression_secs: default_suppression_secs(),
        }
    }
}

fn default_welcome_template() -> String {
    DEFAULT_WELCOME_TEMPLATE.to_string()
}

fn default_suppression_secs() -> u64 {
    50
}

/// Administrator allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Users who receive error and status reports
    #[serde(default)]
    pub user_ids: Vec<UserId>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            user_ids: vec![UserId(1073863060843937812), UserId(1175571621025689661)],
        }
    }
}

/// Periodic direct-message configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessageConfig {
    /// Users who receive the periodic message
    #[serde(default)]
    pub user_ids: Vec<UserId>,
    /// Message text
    #[serde(default = "default_dm_message")]
    pub message: String,
    /// Seconds between runs
    #[serde(default = "default_dm_interval")]
    pub interval_secs: u64,
}

impl DirectMessageConfig {
    /// Period between runs, at least one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for DirectMessageConfig {
    fn default() -> Self {
        Self {
            user_ids: vec![UserId(1175571621025689661), UserId(1073863060843937812)],
            message: default_dm_message(),
            interval_secs: default_dm_interval(),
        }
    }
}

fn default_dm_message() -> String {
    DEFAULT_DM_MESSAGE.to_string()
}

fn default_dm_interval() -> u64 {
    3600
}

/// Log monitor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMonitorConfig {
    /// Whether the monitor runs at all
    #[serde(default)]
    pub enabled: bool,
    /// Log artifact to scan
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
    /// Case-insensitive regular expression marking an error line
    #[serde(default = "default_log_pattern")]
    pub pattern: String,
    /// Seconds between scans
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
    /// Minimum seconds between two error reports
    #[serde(default = "default_error_cooldown_secs")]
    pub error_cooldown_secs: u64,
    /// Seconds between all-clear reports
    #[serde(default = "default_all_clear_secs")]
    pub all_clear_secs: u64,
}

impl LogMonitorConfig {
    /// Period between scans, at least one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs.max(1))
    }

    /// Cooldown between error reports.
    pub fn error_cooldown(&self) -> Duration {
        Duration::from_secs(self.error_cooldown_secs)
    }

    /// Window between all-clear reports.
    pub fn all_clear_interval(&self) -> Duration {
        Duration::from_secs(self.all_clear_secs)
    }
}

impl Default for LogMonitorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            pattern: default_log_pattern(),
            poll_secs: default_poll_secs(),
            error_cooldown_secs: default_error_cooldown_secs(),
            all_clear_secs: default_all_clear_secs(),
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("bot.log")
}

fn default_log_pattern() -> String {
    "error".to_string()
}

fn default_poll_secs() -> u64 {
    60
}

fn default_error_cooldown_secs() -> u64 {
    300
}

fn default_all_clear_secs() -> u64 {
    3600
}

/// Liveness server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Minimum seconds between two "health check received" log lines
    #[serde(default = "default_health_log_secs")]
    pub health_log_secs: u64,
    /// Also answer `GET /` with the health payload
    #[serde(default = "default_root_route")]
    pub root_route: bool,
}

impl ServerConfig {
    /// Minimum interval between health log lines.
    pub fn health_log_interval(&self) -> Duration {
        Duration::from_secs(self.health_log_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            health_log_secs: default_health_log_secs(),
            root_route: default_root_route(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_health_log_secs() -> u64 {
    300
}

fn default_root_route() -> bool {
    true
}

/// Self-ping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepAliveConfig {
    /// Whether the self-ping loop runs
    #[serde(default = "default_keep_alive_enabled")]
    pub enabled: bool,
    /// Externally reachable liveness URL
    #[serde(default = "default_keep_alive_url")]
    pub url: String,
    /// Seconds between pings
    #[serde(default = "default_keep_alive_secs")]
    pub interval_secs: u64,
}

impl KeepAliveConfig {
    /// Period between pings, at least one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: default_keep_alive_enabled(),
            url: default_keep_alive_url(),
            interval_secs: default_keep_alive_secs(),
        }
    }
}

fn default_keep_alive_enabled() -> bool {
    true
}

fn default_keep_alive_url() -> String {
    "https://bot-2ptf.onrender.com/health".to_string()
}

fn default_keep_alive_secs() -> u64 {
    300
}

/// Gateway reconnect configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconnectConfig {
    /// Fixed seconds to wait between reconnect attempts
    #[serde(default = "default_reconnect_delay")]
    pub delay_secs: u64,
}

impl ReconnectConfig {
    /// Delay between attempts, at least one second.
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs.max(1))
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_reconnect_delay(),
        }
    }
}

fn default_reconnect_delay() -> u64 {
    5
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info,serenity=warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_error::ConciergeErrorKind;

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[welcome]
channel_id = 10
role_id = 20

[admins]
user_ids = [1, 2, 3]
"#;

        let config = ConciergeConfig::from_toml_str(toml).expect("Valid TOML");
        assert_eq!(config.welcome.channel_id, ChannelId(10));
        assert_eq!(config.welcome.role_id, RoleId(20));
        assert_eq!(config.welcome.suppression_secs, 50);
        assert_eq!(config.admins.user_ids, vec![UserId(1), UserId(2), UserId(3)]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.reconnect.delay(), Duration::from_secs(5));
        assert!(!config.log_monitor.enabled);
    }

    #[test]
    fn test_render_replaces_role_placeholder() {
        let welcome = WelcomeConfig {
            template: "Hi {role}, welcome!".to_string(),
            ..WelcomeConfig::default()
        };
        assert_eq!(welcome.render("<@&5>"), "Hi <@&5>, welcome!");
    }

    #[test]
    fn test_port_override() {
        let mut config = ConciergeConfig::default();
        config.apply_port_override(Some("10000")).expect("Valid port");
        assert_eq!(config.server.port, 10000);

        config.apply_port_override(Some("  ")).expect("Blank is ignored");
        assert_eq!(config.server.port, 10000);

        let err = config
            .apply_port_override(Some("http"))
            .expect_err("Not a number");
        assert!(matches!(
            err.kind(),
            ConciergeErrorKind::Config(e)
                if matches!(e.kind(), ConfigErrorKind::InvalidPort { value, .. } if value == "http")
        ));
        assert!(config.apply_port_override(Some("70000")).is_err());
    }

    #[test]
    fn test_validate_flags_empty_lists_and_zero_intervals() {
        let mut config = ConciergeConfig::default();
        assert!(config.validate().is_empty());

        config.admins.user_ids.clear();
        config.log_monitor.poll_secs = 0;
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("admins.user_ids")));
        assert!(warnings.iter().any(|w| w.contains("log_monitor.poll_secs")));
        assert_eq!(config.log_monitor.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_reconnect_delay_is_clamped() {
        let mut config = ConciergeConfig::default();
        config.reconnect.delay_secs = 0;

        assert_eq!(config.reconnect.delay(), Duration::from_secs(1));
        assert!(
            config
                .validate()
                .iter()
                .any(|w| w.contains("reconnect.delay_secs"))
        );
    }

    #[test]
    fn test_validate_flags_zero_snowflakes() {
        let mut config = ConciergeConfig::default();
        config.direct_messages.user_ids.push(UserId(0));

        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("direct_messages.user_ids contains 0")));
        assert!(!warnings.iter().any(|w| w.contains("admins.user_ids")));
    }
}
