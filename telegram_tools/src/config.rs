use log::*;
use pom_common::Secret;

pub const DEFAULT_TELEGRAM_API_HOST: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    pub api_host: String,
    pub bot_token: Secret,
}

impl TelegramConfig {
    pub fn new(bot_token: Secret) -> Self {
        Self { api_host: DEFAULT_TELEGRAM_API_HOST.to_string(), bot_token }
    }

    pub fn new_from_env_or_default() -> Self {
        let bot_token = Secret::new(std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_else(|_| {
            warn!("TELEGRAM_BOT_TOKEN not set. The bot will not be able to send notifications.");
            String::default()
        }));
        Self::new(bot_token)
    }
}
