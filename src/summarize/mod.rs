//! Item summarizer: turns one fetched record into a record with
//! `agent_summary` set, preferring backend-generated text and falling back
//! to deterministic truncations. The input record is never mutated.

pub mod backend;

use crate::types::{PaperRecord, RepoRecord, SummarizedPaper, SummarizedRepo};
use backend::BackendSelector;

const PAPER_MAX_TOKENS: u32 = 256;
const REPO_MAX_TOKENS: u32 = 120;

/// Fixed placeholder for repositories with no description.
pub const NO_DESCRIPTION: &str = "No description available";

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

pub fn build_paper_prompt(title: &str, introduction: Option<&str>, abstract_text: &str) -> String {
    let text = introduction
        .filter(|s| !s.is_empty())
        .unwrap_or(abstract_text);
    format!(
        "You are an assistant that summarizes academic papers.\n\
         Given the paper title and its Introduction (or abstract if Introduction missing), \
         produce a concise 2-3 sentence summary focused on: 1) the main contributions / innovations, \
         and 2) a brief description of the methods/work.\n\n\
         Title: {title}\n\nIntroduction/Abstract:\n{text}\n\n\
         Return only the summary text."
    )
}

pub fn build_repo_prompt(full_name: &str, description: Option<&str>) -> String {
    format!(
        "Summarize this GitHub repository in 1-2 sentences focusing on its purpose and strengths.\n\n\
         Name: {full_name}\nDescription: {}\n",
        description.unwrap_or("")
    )
}

/// Fallback order for papers: short heuristic summary, then the first 400
/// characters of the introduction, then of the abstract.
fn paper_fallback(record: &PaperRecord) -> String {
    if !record.summary_short.is_empty() {
        return record.summary_short.clone();
    }
    if let Some(intro) = record.introduction.as_deref() {
        if !intro.is_empty() {
            return truncate_chars(intro, 400);
        }
    }
    truncate_chars(&record.abstract_text, 400)
}

/// Fallback for repositories: truncated description or a fixed placeholder.
fn repo_fallback(record: &RepoRecord) -> String {
    match record.description.as_deref() {
        Some(d) if !d.is_empty() => truncate_chars(d, 300),
        _ => NO_DESCRIPTION.to_string(),
    }
}

pub async fn summarize_paper(selector: &BackendSelector, record: PaperRecord) -> SummarizedPaper {
    let mut generated = None;
    if selector.is_enabled() {
        let prompt = build_paper_prompt(
            &record.title,
            record.introduction.as_deref(),
            &record.abstract_text,
        );
        generated = selector.generate(&prompt, PAPER_MAX_TOKENS).await;
    }
    let agent_summary = match generated {
        Some(text) if !text.is_empty() => text,
        _ => paper_fallback(&record),
    };
    SummarizedPaper {
        record,
        agent_summary,
    }
}

pub async fn summarize_repo(selector: &BackendSelector, record: RepoRecord) -> SummarizedRepo {
    let mut generated = None;
    if selector.is_enabled() {
        let prompt = build_repo_prompt(&record.full_name, record.description.as_deref());
        generated = selector.generate(&prompt, REPO_MAX_TOKENS).await;
    }
    let agent_summary = match generated {
        Some(text) if !text.is_empty() => text,
        _ => repo_fallback(&record),
    };
    SummarizedRepo {
        record,
        agent_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_prompt_uses_introduction_when_present() {
        let p = build_paper_prompt("T", Some("the intro"), "the abstract");
        assert!(p.contains("the intro"));
        assert!(!p.contains("the abstract"));

        let p = build_paper_prompt("T", None, "the abstract");
        assert!(p.contains("the abstract"));
    }

    #[test]
    fn paper_fallback_precedence() {
        let mut rec = PaperRecord {
            summary_short: "short one".into(),
            introduction: Some("intro text".into()),
            abstract_text: "abstract text".into(),
            ..Default::default()
        };
        assert_eq!(paper_fallback(&rec), "short one");

        rec.summary_short.clear();
        assert_eq!(paper_fallback(&rec), "intro text");

        rec.introduction = None;
        assert_eq!(paper_fallback(&rec), "abstract text");
    }

    #[test]
    fn paper_fallback_truncates_to_400_chars() {
        let rec = PaperRecord {
            abstract_text: "x".repeat(1000),
            ..Default::default()
        };
        assert_eq!(paper_fallback(&rec).chars().count(), 400);
    }

    #[test]
    fn repo_fallback_truncates_or_placeholders() {
        let mut rec = RepoRecord {
            description: Some("d".repeat(500)),
            ..Default::default()
        };
        assert_eq!(repo_fallback(&rec).chars().count(), 300);

        rec.description = Some(String::new());
        assert_eq!(repo_fallback(&rec), NO_DESCRIPTION);
        rec.description = None;
        assert_eq!(repo_fallback(&rec), NO_DESCRIPTION);
    }
}
