//! Environment-driven configuration
//!
//! All settings come from the environment (a `.env` file is loaded by the
//! binary before this runs). Missing required settings abort startup before
//! the gateway connects.

use anyhow::{bail, Context, Result};

/// Runtime configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required)
    pub discord_token: String,
    /// The single channel the board and all notifications live in (required)
    pub channel_id: u64,
    /// How often the board message is re-rendered, in milliseconds
    pub update_interval_ms: u64,
    /// Prefix that marks a message as a command, e.g. `r!`
    pub command_prefix: String,
    /// Fixed UTC offset applied when resolving "HH:MM" time tokens
    pub utc_offset_hours: i32,
    /// Optional bind address for the HTTP keepalive responder
    pub keepalive_addr: Option<String>,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let discord_token =
            std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;

        let channel_id = std::env::var("REMINDER_CHANNEL_ID")
            .context("REMINDER_CHANNEL_ID must be set")?
            .parse::<u64>()
            .context("REMINDER_CHANNEL_ID must be a numeric channel id")?;

        let update_interval_ms = match std::env::var("UPDATE_INTERVAL_MS") {
            Ok(value) => {
                let ms = value
                    .parse::<u64>()
                    .context("UPDATE_INTERVAL_MS must be a number of milliseconds")?;
                if ms == 0 {
                    bail!("UPDATE_INTERVAL_MS must be greater than zero");
                }
                ms
            }
            Err(_) => 30_000,
        };

        let command_prefix =
            std::env::var("COMMAND_PREFIX").unwrap_or_else(|_| "r!".to_string());

        let utc_offset_hours = match std::env::var("UTC_OFFSET_HOURS") {
            Ok(value) => {
                let hours = value
                    .parse::<i32>()
                    .context("UTC_OFFSET_HOURS must be an integer")?;
                if !(-23..=23).contains(&hours) {
                    bail!("UTC_OFFSET_HOURS must be between -23 and 23");
                }
                hours
            }
            Err(_) => 0,
        };

        let keepalive_addr = std::env::var("KEEPALIVE_ADDR").ok();

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            channel_id,
            update_interval_ms,
            command_prefix,
            utc_offset_hours,
            keepalive_addr,
            log_level,
        })
    }
}
