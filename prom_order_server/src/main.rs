use dotenvy::dotenv;
use log::*;
use prom_order_server::{
    config::ServerConfig,
    errors::ServerError,
    processor::{OrderProcessor, ProcessorOptions},
    server::create_health_server,
};
use prom_tools::PromApi;
use telegram_tools::TelegramApi;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = ServerConfig::from_env_or_default();

    if let Err(e) = run(config).await {
        eprintln!("{e}");
    }
}

async fn run(config: ServerConfig) -> Result<(), ServerError> {
    info!("🚀️ Starting liveness endpoint on port {}", config.health_port);
    let health_server = create_health_server(config.health_port)?;
    tokio::spawn(health_server);

    let shops = config
        .shops
        .iter()
        .cloned()
        .map(PromApi::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🛍️ Loaded {} Prom.ua shop token(s).", shops.len());
    let messenger =
        TelegramApi::new(config.telegram.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;

    let options = ProcessorOptions::from_config(&config);
    let processor = OrderProcessor::new(shops, messenger, options);
    info!("🚀️ Starting order monitoring loop");
    processor.run().await;
    Ok(())
}
