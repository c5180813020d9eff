// src/utils/error.rs
use thiserror::Error;

// Failures talking to one of the upstream sites (Screener, NewsAPI, Alpha Vantage)
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden

    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    #[error("Invalid stock symbol: {0}")]
    InvalidSymbol(String), // Price API answered with an explicit error payload
}

// Failures inside the extraction layer. These never leave the orchestrator.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Table not found in section: {0}")]
    TableNotFound(String),

    #[error("No period columns in header of section: {0}")]
    NoPeriods(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Bind/serve failures

    #[error("Upstream interaction failed: {0}")]
    Upstream(#[from] UpstreamError),
}
