//! Startup configuration, read once from the environment.
//! Both required values must be present; the process refuses to start
//! without them instead of failing on the first command.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is missing; set it in the environment or .env")]
    MissingBotToken,
    #[error("DATABASE_URL is missing; set it in the environment or .env (e.g. sqlite://genshin_bot.db)")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    /// Optional external card-rendering service; the built-in fallback
    /// raster is used when unset.
    pub card_service_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = read("BOT_TOKEN").ok_or(ConfigError::MissingBotToken)?;
        let database_url = read("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
        Ok(Self {
            bot_token,
            database_url,
            card_service_url: read("CARD_SERVICE_URL"),
        })
    }
}

fn read(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
