// src/server/handlers.rs
use crate::extractors::CompanySnapshot;
use crate::news::models::NewsArticle;
use crate::prices::models::PricePoint;
use crate::screener::models::CompanyMatch;
use crate::server::response::ApiError;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

const SERVICE_NAME: &str = "Stock Analyzer Backend API";

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "search": "GET /api/search?q=<query>",
            "company": "GET /api/company/<company_url>",
            "news": "GET /api/news/<company_name>",
            "stock_price": "GET /api/stock-price/<stock_code>",
            "health": "GET /health"
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CompanyMatch>>, ApiError> {
    // Only a missing or empty `q` is rejected; whitespace is passed through
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::bad_request("Query parameter required"));
    }

    let hits = state
        .screener
        .search(&query)
        .await
        .map_err(|e| ApiError::upstream("search companies", e))?;
    Ok(Json(hits))
}

pub async fn company(
    State(state): State<AppState>,
    Path(company_url): Path<String>,
) -> Result<Json<CompanySnapshot>, ApiError> {
    let html = state
        .screener
        .fetch_company_page(&company_url)
        .await
        .map_err(|e| ApiError::upstream("fetch company data", e))?;

    // Parsed document stays inside this call; it is not Send.
    let snapshot = CompanySnapshot::from_html(&html);
    tracing::info!("Data extraction successful for {}", company_url);
    Ok(Json(snapshot))
}

pub async fn news(
    State(state): State<AppState>,
    Path(company_name): Path<String>,
) -> Result<Json<Vec<NewsArticle>>, ApiError> {
    let articles = state
        .news
        .fetch_articles(&company_name)
        .await
        .map_err(|e| ApiError::upstream("fetch news", e))?;
    Ok(Json(articles))
}

pub async fn stock_price(
    State(state): State<AppState>,
    Path(stock_code): Path<String>,
) -> Result<Json<Vec<PricePoint>>, ApiError> {
    let prices = state
        .prices
        .fetch_daily_closes(&stock_code)
        .await
        .map_err(|e| ApiError::upstream("fetch stock prices", e))?;
    Ok(Json(prices))
}
