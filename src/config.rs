//! Environment configuration

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UPGRADE_URL: &str = "https://buy.stripe.com/airlo-monthly";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} is not a valid port: {value}")]
    InvalidPort { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Shared secret the transport presents in `X-Bot-Token`
    pub bot_token: String,
    pub port: u16,
    pub upgrade_url: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = lookup("TRIPCHECK_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("TRIPCHECK_BOT_TOKEN"))?;

        let port = match lookup("TRIPCHECK_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                name: "TRIPCHECK_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let upgrade_url =
            lookup("TRIPCHECK_UPGRADE_URL").unwrap_or_else(|| DEFAULT_UPGRADE_URL.to_string());

        Ok(Self {
            bot_token,
            port,
            upgrade_url,
        })
    }
}
