// src/news/models.rs
use serde::{Deserialize, Serialize};

pub const SUMMARY_MAX_CHARS: usize = 200;
pub const DEFAULT_SENTIMENT: &str = "neutral";
pub const DEFAULT_IMPACT: &str = "Impact analysis requires sentiment analysis integration";

/// NewsAPI `/v2/everything` payload (only the parts we read).
#[derive(Debug, Deserialize)]
pub struct EverythingResponse {
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub source: Option<RawSource>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

/// Article as returned to our callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: Option<String>,
    pub date: Option<String>,
    pub source: Option<String>,
    pub summary: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub sentiment: String,
    pub impact: String,
}

impl From<RawArticle> for NewsArticle {
    fn from(raw: RawArticle) -> Self {
        let summary = summarize(raw.description.as_deref(), raw.content.as_deref());
        Self {
            title: raw.title,
            date: raw.published_at,
            source: raw.source.and_then(|s| s.name),
            summary,
            url: raw.url,
            image_url: raw.url_to_image,
            sentiment: DEFAULT_SENTIMENT.to_string(),
            impact: DEFAULT_IMPACT.to_string(),
        }
    }
}

/// The description when it has text, else the first 200 characters of the content.
pub fn summarize(description: Option<&str>, content: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => content
            .unwrap_or_default()
            .chars()
            .take(SUMMARY_MAX_CHARS)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_wins_over_content() {
        assert_eq!(summarize(Some("Short"), Some("Long content")), "Short");
    }

    #[test]
    fn content_is_truncated_by_characters() {
        let content = "₹".repeat(250);
        let summary = summarize(None, Some(&content));
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);

        assert_eq!(summarize(Some(""), Some("fallback")), "fallback");
        assert_eq!(summarize(None, None), "");
    }

    #[test]
    fn raw_article_maps_to_response_shape() {
        let raw: RawArticle = serde_json::from_value(serde_json::json!({
            "source": {"id": null, "name": "Mint"},
            "title": "Results beat estimates",
            "description": null,
            "content": "Quarterly profit rose",
            "url": "https://example.com/a",
            "urlToImage": "https://example.com/a.png",
            "publishedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        let json = serde_json::to_value(NewsArticle::from(raw)).unwrap();
        assert_eq!(json["source"], "Mint");
        assert_eq!(json["date"], "2024-05-01T10:00:00Z");
        assert_eq!(json["summary"], "Quarterly profit rose");
        assert_eq!(json["imageUrl"], "https://example.com/a.png");
        assert_eq!(json["sentiment"], "neutral");
    }
}
