// src/config.rs
use clap::Parser;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Stock analyzer backend: proxies Screener.in company pages, NewsAPI and
/// Alpha Vantage as JSON.
///
/// Every option can also come from the environment (or a `.env` file).
/// The parsed value is immutable and shared with the upstream clients.
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Base URL of the financial data site
    #[arg(long, env = "SCREENER_BASE_URL", default_value = "https://www.screener.in")]
    pub screener_base_url: String,

    /// NewsAPI "everything" endpoint
    #[arg(long, env = "NEWS_API_URL", default_value = "https://newsapi.org/v2/everything")]
    pub news_api_url: String,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", default_value = "your_newsapi_key_here", hide_env_values = true)]
    pub news_api_key: String,

    /// Alpha Vantage query endpoint
    #[arg(long, env = "ALPHA_VANTAGE_URL", default_value = "https://www.alphavantage.co/query")]
    pub alpha_vantage_url: String,

    /// Alpha Vantage key
    #[arg(long, env = "ALPHA_VANTAGE_KEY", default_value = "your_alphavantage_key_here", hide_env_values = true)]
    pub alpha_vantage_key: String,

    /// User-Agent sent to the financial data site
    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Timeout in seconds for company page and price fetches
    #[arg(long, env = "PAGE_TIMEOUT_SECS", default_value_t = 15)]
    pub page_timeout_secs: u64,

    /// Timeout in seconds for search and news calls
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 10)]
    pub api_timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logs the effective configuration with the API keys redacted.
    pub fn log_summary(&self) {
        tracing::info!(
            "Config: bind={} screener={} news={} (key {}) prices={} (key {})",
            self.bind_addr(),
            self.screener_base_url,
            self.news_api_url,
            redact(&self.news_api_key),
            self.alpha_vantage_url,
            redact(&self.alpha_vantage_key),
        );
    }

    /// Config pointing every upstream at `base`, for tests against a mock server.
    #[cfg(test)]
    pub fn for_upstream(base: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            screener_base_url: base.to_string(),
            news_api_url: format!("{}/v2/everything", base),
            news_api_key: "test-news-key".to_string(),
            alpha_vantage_url: format!("{}/query", base),
            alpha_vantage_key: "test-av-key".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout_secs: 5,
            api_timeout_secs: 5,
            log_level: "debug".to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("screener_base_url", &self.screener_base_url)
            .field("news_api_url", &self.news_api_url)
            .field("news_api_key", &redact(&self.news_api_key))
            .field("alpha_vantage_url", &self.alpha_vantage_url)
            .field("alpha_vantage_key", &redact(&self.alpha_vantage_key))
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
