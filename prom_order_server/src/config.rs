use std::{env, path::PathBuf, time::Duration};

use log::*;
use pom_common::{
    helpers::{parse_flag, split_token_list},
    Secret,
};
use prom_tools::{OrderStatus, PromConfig};
use telegram_tools::TelegramConfig;

const DEFAULT_HEALTH_PORT: u16 = 8080;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_NOTES_PATH: &str = "prom_import_data.json";
const DEFAULT_LEDGER_PATH: &str = "processed_orders.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the liveness endpoint. Host monitors probe it; nothing else uses it.
    pub health_port: u16,
    /// One Prom.ua client configuration per shop token.
    pub shops: Vec<PromConfig>,
    pub telegram: TelegramConfig,
    /// The channel that receives order notifications.
    pub chat_id: String,
    /// Where the fallback-notes snapshot lives on disk.
    pub notes_path: PathBuf,
    /// Where the processed-order ledger lives on disk.
    pub ledger_path: PathBuf,
    /// Order statuses scanned by the notify pass.
    pub target_statuses: Vec<OrderStatus>,
    /// When true, orders in `pending` are moved to `received` every cycle.
    pub auto_accept: bool,
    /// Sleep between polling cycles. The Telegram long poll provides most of the pacing.
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            health_port: DEFAULT_HEALTH_PORT,
            shops: Vec::new(),
            telegram: TelegramConfig::default(),
            chat_id: String::default(),
            notes_path: PathBuf::from(DEFAULT_NOTES_PATH),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            target_statuses: default_target_statuses(),
            auto_accept: true,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let health_port = env::var("PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for PORT. {e} Using the default, {DEFAULT_HEALTH_PORT}, instead.");
                    DEFAULT_HEALTH_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_HEALTH_PORT);
        let tokens = env::var("PROM_API_TOKEN").map(|s| split_token_list(&s)).unwrap_or_default();
        if tokens.is_empty() {
            warn!("🪛️ PROM_API_TOKEN is not set. No shops will be monitored. Check your .env file.");
        }
        let shops = tokens.into_iter().map(|t| PromConfig::new(Secret::new(t))).collect();
        let telegram = TelegramConfig::new_from_env_or_default();
        let chat_id = env::var("TELEGRAM_CHAT_ID").unwrap_or_else(|_| {
            error!("🪛️ TELEGRAM_CHAT_ID is not set. Please set it to the channel that receives notifications.");
            String::default()
        });
        let notes_path =
            env::var("SHARED_DATA_PATH").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(DEFAULT_NOTES_PATH));
        let ledger_path = env::var("POM_PROCESSED_ORDERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEDGER_PATH));
        let target_statuses = env::var("POM_TARGET_STATUSES")
            .map(|s| split_token_list(&s).into_iter().map(OrderStatus::from).collect::<Vec<_>>())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_target_statuses);
        let auto_accept = env::var("POM_AUTO_ACCEPT").ok().and_then(|v| parse_flag(&v)).unwrap_or(true);
        let poll_interval = env::var("POM_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for POM_POLL_INTERVAL_SECS. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
        Self {
            health_port,
            shops,
            telegram,
            chat_id,
            notes_path,
            ledger_path,
            target_statuses,
            auto_accept,
            poll_interval,
        }
    }
}

fn default_target_statuses() -> Vec<OrderStatus> {
    // `custom-133340` is the merchant's "In Work" status.
    vec![OrderStatus::Received, OrderStatus::Processing, OrderStatus::Custom("custom-133340".to_string())]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.health_port, 8080);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert!(config.auto_accept);
        assert_eq!(config.target_statuses, vec![
            OrderStatus::Received,
            OrderStatus::Processing,
            OrderStatus::Custom("custom-133340".to_string())
        ]);
    }
}
