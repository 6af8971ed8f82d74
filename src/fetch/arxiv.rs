//! arXiv Atom API fetcher. Parses the feed with quick-xml serde derive and
//! optionally mines the PDF full text for an Introduction section.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::fetch::{collapse_ws, fulltext};
use crate::heuristics;
use crate::types::PaperRecord;

const API_URL: &str = "http://export.arxiv.org/api/query";

// ---- Atom feed shape (namespaced fields keep their qualified names) ----

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    id: String,
    title: String,
    summary: Option<String>,
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<Author>,
    #[serde(rename = "link", default)]
    links: Vec<Link>,
    #[serde(rename = "primary_category")]
    primary_category: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@href")]
    href: String,
    #[serde(rename = "@title")]
    title: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
    #[serde(rename = "@type")]
    content_type: Option<String>,
}

/// Build the search query: latest CS papers, optionally narrowed by keywords.
pub fn build_query(keywords: &str) -> String {
    if keywords.trim().is_empty() {
        "cat:cs*".to_string()
    } else {
        format!("({}) AND cat:cs*", keywords.trim())
    }
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

pub struct ArxivFetcher {
    mode: Mode,
}

impl ArxivFetcher {
    /// Parse from a canned feed body instead of hitting the network.
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
        Self {
            mode: Mode::Http { client },
        }
    }

    /// Fetch latest CS papers, or a single paper when `arxiv_id` is given.
    pub async fn fetch(
        &self,
        max_results: usize,
        keywords: &str,
        arxiv_id: Option<&str>,
    ) -> Result<Vec<PaperRecord>> {
        let body = match &self.mode {
            Mode::Fixture(s) => s.clone(),
            Mode::Http { client } => {
                let req = if let Some(id) = arxiv_id {
                    client
                        .get(API_URL)
                        .query(&[("id_list", id), ("max_results", "1")])
                } else {
                    client.get(API_URL).query(&[
                        ("search_query", build_query(keywords).as_str()),
                        ("start", "0"),
                        ("max_results", &max_results.to_string()),
                        ("sortBy", "submittedDate"),
                        ("sortOrder", "descending"),
                    ])
                };
                req.send()
                    .await
                    .context("arxiv api request")?
                    .error_for_status()
                    .context("arxiv api status")?
                    .text()
                    .await
                    .context("arxiv api body")?
            }
        };

        let mut records = parse_feed(&body)?;
        // Single-id lookups pass max_results = 1 explicitly.
        records.truncate(max_results);

        // Best-effort Introduction mining from the PDF; failures leave the
        // abstract as the only text source.
        if let Mode::Http { client } = &self.mode {
            for rec in records.iter_mut() {
                if let Some(url) = rec.pdf_url.clone() {
                    if let Some(text) = fulltext::fetch_pdf_text(client, &url).await {
                        rec.introduction = heuristics::extract_introduction(&text, 3);
                    } else {
                        debug!(id = %rec.id, "no full text; using abstract only");
                    }
                }
                rec.derive_summary_fields();
            }
        }

        Ok(records)
    }
}

/// Parse an Atom feed body into paper records with derived summary fields.
pub fn parse_feed(xml: &str) -> Result<Vec<PaperRecord>> {
    let feed: Feed = quick_xml::de::from_str(xml).context("parsing arxiv atom feed")?;

    let mut out = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let pdf_url = entry
            .links
            .iter()
            .find(|l| {
                l.title.as_deref() == Some("pdf")
                    || (l.rel.as_deref() == Some("related")
                        && l.content_type.as_deref() == Some("application/pdf"))
            })
            .map(|l| l.href.clone());

        let mut rec = PaperRecord {
            id: short_id(&entry.id),
            title: collapse_ws(&entry.title),
            abstract_text: collapse_ws(entry.summary.as_deref().unwrap_or_default()),
            introduction: None,
            summary_short: String::new(),
            keywords: Vec::new(),
            authors: entry.authors.into_iter().map(|a| a.name).collect(),
            published: entry.published.unwrap_or_default(),
            pdf_url,
            primary_category: entry.primary_category.map(|c| c.term),
        };
        rec.derive_summary_fields();
        out.push(rec);
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "@term")]
    term: String,
}

/// "http://arxiv.org/abs/2301.01234v1" -> "2301.01234v1"
fn short_id(id_url: &str) -> String {
    id_url
        .rsplit('/')
        .next()
        .unwrap_or(id_url)
        .to_string()
}
