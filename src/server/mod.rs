// src/server/mod.rs
pub mod handlers;
pub mod response;

use crate::config::Config;
use crate::news::NewsClient;
use crate::prices::PriceClient;
use crate::screener::ScreenerClient;
use crate::utils::error::{AppError, UpstreamError};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Upstream clients shared by all handlers. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screener: ScreenerClient,
    pub news: NewsClient,
    pub prices: PriceClient,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Result<Self, UpstreamError> {
        Ok(Self {
            screener: ScreenerClient::new(Arc::clone(&config))?,
            news: NewsClient::new(Arc::clone(&config))?,
            prices: PriceClient::new(config)?,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/search", get(handlers::search))
        .route("/api/company/*company_url", get(handlers::company))
        .route("/api/news/:company_name", get(handlers::news))
        .route("/api/stock-price/:stock_code", get(handlers::stock_price))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(config: Arc<Config>) -> Result<(), AppError> {
    let state = AppState::new(Arc::clone(&config))?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Server starting on http://{}", listener.local_addr()?);
    tracing::info!("  GET  /api/search?q=<query>           - Search companies");
    tracing::info!("  GET  /api/company/<company_url>      - Get company data");
    tracing::info!("  GET  /api/news/<company_name>        - Get company news");
    tracing::info!("  GET  /api/stock-price/<stock_code>   - Get stock prices");

    axum::serve(listener, app).await?;
    Ok(())
}
