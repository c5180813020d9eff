// src/prices/models.rs
use crate::utils::error::UpstreamError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most recent trading days returned per request.
pub const PRICE_WINDOW: usize = 365;

/// Alpha Vantage `TIME_SERIES_DAILY` payload. Error and throttling
/// responses arrive with HTTP 200 and one of the message fields instead
/// of the series.
#[derive(Debug, Deserialize)]
pub struct DailySeriesResponse {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    // ISO dates, so key order is chronological
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: BTreeMap<String, DailyBar>,
}

#[derive(Debug, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "4. close")]
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

impl DailySeriesResponse {
    /// Closing prices for the latest [`PRICE_WINDOW`] dates, oldest first.
    pub fn into_price_points(self, symbol: &str) -> Result<Vec<PricePoint>, UpstreamError> {
        if let Some(message) = self.error_message {
            tracing::warn!("Price API rejected '{}': {}", symbol, message);
            return Err(UpstreamError::InvalidSymbol(symbol.to_string()));
        }
        if let Some(message) = self.note.or(self.information) {
            tracing::warn!("Price API returned a notice for '{}': {}", symbol, message);
        }

        let mut points = self
            .time_series
            .into_iter()
            .rev()
            .take(PRICE_WINDOW)
            .map(|(date, bar)| {
                let price = bar.close.trim().parse::<f64>().map_err(|e| {
                    UpstreamError::Parse(format!("close '{}' on {}: {}", bar.close, date, e))
                })?;
                Ok(PricePoint { date, price })
            })
            .collect::<Result<Vec<_>, UpstreamError>>()?;

        points.reverse(); // Chronological order
        Ok(points)
    }
}
