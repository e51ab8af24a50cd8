// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, the community store, and start the HTTP server

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use weather_finder::clock::{Clock, SystemClock};
use weather_finder::config::{self, Config, StoreBackend};
use weather_finder::db::{CommunityStore, MemoryCommunityStore, PgCommunityStore};
use weather_finder::handlers;
use weather_finder::services::CommunityService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration and initialize logging
    let config = Config::from_env();
    weather_finder::init_logging(&config.log_level);

    if let Err(e) = config.validate() {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Starting weather-finder service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 3. Initialize the community store
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn CommunityStore> = match config.store_backend() {
        Some(StoreBackend::Memory) => {
            log::warn!("Using in-memory community store - data is lost on restart");
            Arc::new(MemoryCommunityStore::new(clock))
        }
        _ => {
            let pool = match config::init_db_pool(&config).await {
                Ok(pool) => pool,
                Err(e) => {
                    log::error!("Failed to connect to database: {}", e);
                    std::process::exit(1);
                }
            };
            let store = PgCommunityStore::new(pool, clock);
            if let Err(e) = store.ensure_schema().await {
                log::error!("{}", e);
                std::process::exit(1);
            }
            Arc::new(store)
        }
    };
    let service = web::Data::new(CommunityService::new(store));

    // 4. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(config_data.clone())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            .configure(handlers::health_config)
            .configure(handlers::community_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
