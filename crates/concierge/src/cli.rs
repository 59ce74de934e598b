//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the bot.
#[derive(Parser, Debug)]
#[command(name = "concierge")]
#[command(about = "Concierge - Discord welcome greetings, periodic DMs and admin reports")]
#[command(version)]
pub struct Args {
    /// Extra configuration file layered over the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,

    /// Emit JSON-formatted logs
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    /// The token, if present and not blank.
    pub fn token(&self) -> Option<&str> {
        self.discord_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// First five characters of a secret followed by `****`.
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(5).collect();
    format!("{}****", prefix)
}
