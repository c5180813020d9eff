// src/screener/client.rs
use crate::config::Config;
use crate::screener::models::{company_path, CompanyMatch, SearchHit};
use crate::utils::error::UpstreamError;
use reqwest::header;
use std::sync::Arc;

/// Client for the financial data site: company pages and company search.
#[derive(Debug, Clone)]
pub struct ScreenerClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl ScreenerClient {
    pub fn new(config: Arc<Config>) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str()) // Site rejects non-browser agents
            .build()?;
        Ok(Self { http, config })
    }

    /// Full page URL for a company reference such as `"RELIANCE"`.
    pub fn company_url(&self, reference: &str) -> String {
        format!(
            "{}{}",
            self.config.screener_base_url.trim_end_matches('/'),
            company_path(reference)
        )
    }

    /// Downloads the raw HTML of a company page.
    pub async fn fetch_company_page(&self, reference: &str) -> Result<String, UpstreamError> {
        let url = self.company_url(reference);
        tracing::info!("Fetching data from: {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .timeout(self.config.page_timeout())
            .send()
            .await?; // Propagates reqwest::Error as UpstreamError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(UpstreamError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Queries the site's company search.
    pub async fn search(&self, query: &str) -> Result<Vec<CompanyMatch>, UpstreamError> {
        let url = format!(
            "{}/api/company/search/",
            self.config.screener_base_url.trim_end_matches('/')
        );
        tracing::debug!("Searching companies for '{}'", query);

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .timeout(self.config.api_timeout())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Search returned HTTP {} for '{}'", status, query);
            return Err(UpstreamError::Http(status));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(format!("search response: {}", e)))?;

        Ok(hits.into_iter().map(CompanyMatch::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ScreenerClient {
        ScreenerClient::new(Arc::new(Config::for_upstream(&server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn fetches_company_page_with_normalized_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/company/RELIANCE/"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let body = assert_ok!(client.fetch_company_page("RELIANCE").await);
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = assert_err!(client.fetch_company_page("NOPE").await);
        assert!(matches!(err, UpstreamError::Http(status) if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn search_maps_hits_to_codes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/company/search/"))
            .and(query_param("q", "reliance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Reliance Industries", "url": "/company/RELIANCE/consolidated/"},
                {"id": 2, "name": "Reliance Power", "url": "/company/RPOWER/"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let hits = assert_ok!(client.search("reliance").await);
        let codes: Vec<_> = hits.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["RELIANCE", "RPOWER"]);
    }

    #[tokio::test]
    async fn search_with_bad_json_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = assert_err!(client.search("x").await);
        assert!(matches!(err, UpstreamError::Parse(_)));
    }
}
