// src/screener/models.rs
use serde::{Deserialize, Serialize};

/// One hit from the site's company search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Search result as returned to our callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyMatch {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub url: String,
    pub code: String,
}

impl From<SearchHit> for CompanyMatch {
    fn from(hit: SearchHit) -> Self {
        let url = hit.url.unwrap_or_default();
        let code = company_code(&url);
        Self {
            id: hit.id,
            name: hit.name,
            url,
            code,
        }
    }
}

/// `"/company/RELIANCE/consolidated/"` → `"RELIANCE"`; `"N/A"` when the URL
/// does not point at a company page.
pub fn company_code(url: &str) -> String {
    url.split_once("/company/")
        .and_then(|(_, rest)| rest.split('/').find(|segment| !segment.is_empty()))
        .map(str::to_uppercase)
        .unwrap_or_else(|| "N/A".to_string())
}

/// Turns `"RELIANCE"` or `"/company/RELIANCE"` into `"/company/RELIANCE/"`.
pub fn company_path(reference: &str) -> String {
    let reference = reference.trim();
    let mut path = if reference.starts_with("/company/") {
        reference.to_string()
    } else if reference.starts_with("company/") {
        format!("/{}", reference)
    } else {
        format!("/company/{}/", reference.trim_start_matches('/'))
    };
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}
