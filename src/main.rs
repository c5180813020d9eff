// src/main.rs
mod config;
mod extractors;
mod news;
mod prices;
mod screener;
mod server;
mod utils;

use clap::Parser;
use config::Config;
use std::sync::Arc;
use utils::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Pull a local .env into the environment before clap reads it
    dotenv::dotenv().ok();

    // 2. Parse configuration (flags override environment)
    let config = Arc::new(Config::parse());

    // 3. Setup Logging (RUST_LOG wins over --log-level)
    utils::logging::setup_logging(&config.log_level);
    tracing::info!("Stock analyzer backend v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // 4. Serve until shutdown
    server::serve(config).await
}
