// src/types.rs
use serde::{Deserialize, Serialize};

use crate::heuristics;

/// One fetched arXiv paper, immutable once it leaves the fetcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// First sentences of the Introduction section, when full text was
    /// acquired from the PDF.
    pub introduction: Option<String>,
    /// Two-sentence heuristic summary derived at fetch time.
    pub summary_short: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    /// RFC 3339 publication timestamp as reported by the API.
    pub published: String,
    pub pdf_url: Option<String>,
    pub primary_category: Option<String>,
}

impl PaperRecord {
    /// Fill `summary_short` and `keywords` from the introduction when
    /// present, otherwise from the abstract.
    pub fn derive_summary_fields(&mut self) {
        let basis = self
            .introduction
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.abstract_text.as_str())
            .to_string();
        self.summary_short = heuristics::summarize_text(&basis, 2);
        self.keywords = heuristics::extract_keywords(&basis, 6);
    }
}

/// One fetched GitHub repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepoRecord {
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stars: u64,
    pub language: Option<String>,
    pub updated_at: Option<String>,
}

/// A paper plus its final summary. `agent_summary` is always non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummarizedPaper {
    #[serde(flatten)]
    pub record: PaperRecord,
    pub agent_summary: String,
}

/// A repository plus its final summary. `agent_summary` is always non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummarizedRepo {
    #[serde(flatten)]
    pub record: RepoRecord,
    pub agent_summary: String,
}

/// Per-cycle bookkeeping persisted alongside the result documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleMeta {
    pub arxiv_count: usize,
    pub github_count: usize,
    pub elapsed_secs: f64,
}

/// Output of one fetch-and-summarize cycle across both categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchEnvelope {
    pub papers: Vec<SummarizedPaper>,
    pub repos: Vec<SummarizedRepo>,
    pub meta: CycleMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_prefers_introduction_over_abstract() {
        let mut rec = PaperRecord {
            abstract_text: "Abstract one. Abstract two. Abstract three.".into(),
            introduction: Some("Intro one. Intro two. Intro three.".into()),
            ..Default::default()
        };
        rec.derive_summary_fields();
        assert_eq!(rec.summary_short, "Intro one. Intro two.");

        rec.introduction = None;
        rec.derive_summary_fields();
        assert_eq!(rec.summary_short, "Abstract one. Abstract two.");
    }

    #[test]
    fn abstract_field_serializes_under_reserved_name() {
        let rec = PaperRecord {
            abstract_text: "A.".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["abstract"], "A.");
    }
}
