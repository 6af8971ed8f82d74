//! GitHub repository search fetcher: top repositories by stars, paginated.
//! A `GITHUB_TOKEN` raises the rate limit but is not required.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::types::RepoRecord;

const API_URL: &str = "https://api.github.com/search/repositories";
const PER_PAGE: usize = 30;
// The search API serves at most 1000 results regardless of pagination.
const MAX_PAGES: usize = 34;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    full_name: String,
    html_url: String,
    description: Option<String>,
    stargazers_count: u64,
    language: Option<String>,
    updated_at: Option<String>,
}

impl From<RepoItem> for RepoRecord {
    fn from(item: RepoItem) -> Self {
        RepoRecord {
            full_name: item.full_name,
            html_url: item.html_url,
            description: item.description,
            stars: item.stargazers_count,
            language: item.language,
            updated_at: item.updated_at,
        }
    }
}

/// Combine keywords and language filter; GitHub requires a non-empty query,
/// so "all repositories" becomes `stars:>0`.
pub fn build_query(keywords: &str, language: &str) -> String {
    let mut parts = Vec::new();
    if !keywords.trim().is_empty() {
        parts.push(keywords.trim().to_string());
    }
    if !language.trim().is_empty() {
        parts.push(format!("language:{}", language.trim()));
    }
    if parts.is_empty() {
        "stars:>0".to_string()
    } else {
        parts.join(" ")
    }
}

enum Mode {
    Fixture(String),
    Http {
        client: reqwest::Client,
        token: Option<String>,
    },
}

pub struct GithubFetcher {
    mode: Mode,
}

impl GithubFetcher {
    /// Parse from a canned search response instead of hitting the network.
    pub fn from_fixture(body: &str) -> Self {
        Self {
            mode: Mode::Fixture(body.to_string()),
        }
    }

    pub fn http() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("research-scout/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(20))
            .build()
            .expect("reqwest client");
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self {
            mode: Mode::Http { client, token },
        }
    }

    /// Fetch up to `max_results` repositories sorted by stars descending.
    pub async fn fetch(
        &self,
        max_results: usize,
        keywords: &str,
        language: &str,
    ) -> Result<Vec<RepoRecord>> {
        match &self.mode {
            Mode::Fixture(body) => {
                let mut out = parse_page(body)?;
                out.truncate(max_results);
                Ok(out)
            }
            Mode::Http { client, token } => {
                let query = build_query(keywords, language);
                let mut out: Vec<RepoRecord> = Vec::new();
                let mut page = 1usize;
                while out.len() < max_results && page <= MAX_PAGES {
                    let mut req = client
                        .get(API_URL)
                        .header("Accept", "application/vnd.github+json")
                        .query(&[
                            ("q", query.as_str()),
                            ("sort", "stars"),
                            ("order", "desc"),
                            ("per_page", &PER_PAGE.to_string()),
                            ("page", &page.to_string()),
                        ]);
                    if let Some(token) = token {
                        req = req.bearer_auth(token);
                    }
                    let body = req
                        .send()
                        .await
                        .context("github search request")?
                        .error_for_status()
                        .context("github search status")?
                        .text()
                        .await
                        .context("github search body")?;
                    let items = parse_page(&body)?;
                    if items.is_empty() {
                        break;
                    }
                    out.extend(items);
                    page += 1;
                }
                out.truncate(max_results);
                Ok(out)
            }
        }
    }
}

/// Parse one search-response page into repo records.
pub fn parse_page(body: &str) -> Result<Vec<RepoRecord>> {
    let resp: SearchResponse =
        serde_json::from_str(body).context("parsing github search response")?;
    Ok(resp.items.into_iter().map(RepoRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_combines_keywords_and_language() {
        assert_eq!(build_query("", ""), "stars:>0");
        assert_eq!(build_query("web server", ""), "web server");
        assert_eq!(build_query("", "rust"), "language:rust");
        assert_eq!(build_query("cli", "rust"), "cli language:rust");
    }

    #[test]
    fn parse_page_maps_fields() {
        let body = r#"{"items":[{"full_name":"a/b","html_url":"https://github.com/a/b",
            "description":"desc","stargazers_count":42,"language":"Rust",
            "updated_at":"2025-01-01T00:00:00Z"}]}"#;
        let out = parse_page(body).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].full_name, "a/b");
        assert_eq!(out[0].stars, 42);
        assert_eq!(out[0].language.as_deref(), Some("Rust"));
    }

    #[test]
    fn parse_page_tolerates_missing_items() {
        assert!(parse_page("{}").unwrap().is_empty());
    }
}
