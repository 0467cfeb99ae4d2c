use log::*;
use pom_common::Secret;

pub const DEFAULT_PROM_API_HOST: &str = "https://my.prom.ua/api/v1";

#[derive(Debug, Clone, Default)]
pub struct PromConfig {
    pub api_host: String,
    pub api_token: Secret,
}

impl PromConfig {
    pub fn new(api_token: Secret) -> Self {
        Self { api_host: host_from_env_or_default(), api_token }
    }
}

pub fn host_from_env_or_default() -> String {
    std::env::var("PROM_API_HOST").unwrap_or_else(|_| {
        debug!("PROM_API_HOST not set, using {DEFAULT_PROM_API_HOST}");
        DEFAULT_PROM_API_HOST.to_string()
    })
}
