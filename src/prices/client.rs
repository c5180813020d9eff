// src/prices/client.rs
use crate::config::Config;
use crate::prices::models::{DailySeriesResponse, PricePoint};
use crate::utils::error::UpstreamError;
use std::sync::Arc;

// Listings are looked up on the Bombay Stock Exchange
const EXCHANGE_SUFFIX: &str = ".BSE";

/// Alpha Vantage client for daily closing prices.
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl PriceClient {
    pub fn new(config: Arc<Config>) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.page_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn symbol_for(stock_code: &str) -> String {
        format!("{}{}", stock_code.trim(), EXCHANGE_SUFFIX)
    }

    /// About a year of daily closes for `stock_code`, oldest first.
    pub async fn fetch_daily_closes(&self, stock_code: &str) -> Result<Vec<PricePoint>, UpstreamError> {
        let symbol = Self::symbol_for(stock_code);
        tracing::info!("Fetching daily prices for {}", symbol);

        let response = self
            .http
            .get(&self.config.alpha_vantage_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol.as_str()),
                ("outputsize", "full"),
                ("apikey", self.config.alpha_vantage_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Price API returned HTTP {} for {}", status, symbol);
            return Err(UpstreamError::Http(status));
        }

        let payload: DailySeriesResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(format!("price response: {}", e)))?;

        let points = payload.into_price_points(&symbol)?;
        tracing::debug!("Returning {} daily closes for {}", points.len(), symbol);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn requests_bse_symbol_and_orders_closes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "TIME_SERIES_DAILY"))
            .and(query_param("symbol", "TCS.BSE"))
            .and(query_param("outputsize", "full"))
            .and(query_param("apikey", "test-av-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Time Series (Daily)": {
                    "2024-01-03": {"4. close": "3"},
                    "2024-01-02": {"4. close": "2"},
                    "2024-01-01": {"4. close": "1"}
                }
            })))
            .mount(&server)
            .await;

        let client = PriceClient::new(Arc::new(Config::for_upstream(&server.uri()))).unwrap();
        let points = assert_ok!(client.fetch_daily_closes("TCS").await);
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn error_payload_is_invalid_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Error Message": "Invalid API call. Please retry or visit the documentation."
            })))
            .mount(&server)
            .await;

        let client = PriceClient::new(Arc::new(Config::for_upstream(&server.uri()))).unwrap();
        let err = assert_err!(client.fetch_daily_closes("NOPE").await);
        assert!(matches!(err, UpstreamError::InvalidSymbol(_)));
    }
}
