// src/news/client.rs
use crate::config::Config;
use crate::news::models::{EverythingResponse, NewsArticle};
use crate::utils::error::UpstreamError;
use std::sync::Arc;

const PAGE_SIZE: usize = 10;
const MAX_ARTICLES: usize = 5;

/// NewsAPI client for recent company news.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl NewsClient {
    pub fn new(config: Arc<Config>) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    /// Latest English articles matching `query`, newest first, at most five.
    pub async fn fetch_articles(&self, query: &str) -> Result<Vec<NewsArticle>, UpstreamError> {
        tracing::info!("Fetching news for '{}'", query);

        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(&self.config.news_api_url)
            .query(&[
                ("q", query),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.config.news_api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("News API returned HTTP {} for '{}'", status, query);
            return Err(UpstreamError::Http(status));
        }

        let payload: EverythingResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(format!("news response: {}", e)))?;

        let articles: Vec<NewsArticle> = payload
            .articles
            .into_iter()
            .take(MAX_ARTICLES)
            .map(NewsArticle::from)
            .collect();
        tracing::debug!("Returning {} articles for '{}'", articles.len(), query);
        Ok(articles)
    }
}
