//! Deterministic text heuristics: sentence splitting, introduction and
//! contribution extraction, TF keyword extraction.
//!
//! This is the offline fallback behind every summary, so everything here is
//! pure and deterministic: no network, no disk, no hidden state. Recall is
//! deliberately traded for testability.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Small english stopword set to avoid extra deps.
const STOPWORDS: [&str; 20] = [
    "the", "and", "of", "in", "to", "a", "is", "for", "we", "that", "this", "with", "on", "as",
    "are", "by", "an", "be", "from", "which",
];

/// Section headers that mark the start of an introduction, anchored at line
/// start: bare "Introduction", "1. Introduction", "I. Introduction".
static INTRO_HEADERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)^[ \t]*introduction[ \t]*$",
        r"(?im)^[ \t]*1\.?[ \t]+introduction[ \t]*$",
        r"(?im)^[ \t]*i\.[ \t]*introduction[ \t]*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid intro header pattern"))
    .collect()
});

/// Cue phrases that usually state contributions or novelty.
static CONTRIBUTION_CUES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"we (propose|present|introduce|develop|design|show)",
        r"our contributions?",
        r"in this paper",
        r"the main contributions",
        r"we (demonstrate|evaluate|validate)",
        r"to the best of our knowledge",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid contribution cue pattern"))
    .collect()
});

/// Split text into sentences on `.`, `?`, `!` followed by whitespace.
/// Fragments are trimmed; empty ones are dropped; order is preserved.
///
/// Note: the `regex` crate has no look-behind, so this is a manual scan with
/// the same semantics as the classic `(?<=[.?!])\s+` split.
pub fn split_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut start = 0usize;
    let mut chars = trimmed.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '?' | '!') {
            if let Some(&(j, next)) = chars.peek() {
                if next.is_whitespace() {
                    let frag = trimmed[start..i + c.len_utf8()].trim();
                    if !frag.is_empty() {
                        out.push(frag.to_string());
                    }
                    start = j;
                }
            }
        }
    }
    let tail = trimmed[start..].trim();
    if !tail.is_empty() {
        out.push(tail.to_string());
    }
    out
}

/// First `max_sentences` sentences joined by single spaces. Empty input
/// yields an empty string.
pub fn summarize_text(text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }
    sentences[..sentences.len().min(max_sentences)].join(" ")
}

/// Locate an "Introduction" section header and return the first
/// `max_sentences` sentences after it (scanning at most 8000 characters of
/// body). Falls back to the beginning of the document when no header
/// matches. `None` only for empty input.
pub fn extract_introduction(full_text: &str, max_sentences: usize) -> Option<String> {
    if full_text.trim().is_empty() {
        return None;
    }
    for pat in INTRO_HEADERS.iter() {
        if let Some(m) = pat.find(full_text) {
            let snippet: String = full_text[m.end()..].chars().take(8000).collect();
            let sents = split_sentences(&snippet);
            if !sents.is_empty() {
                return Some(sents[..sents.len().min(max_sentences)].join(" "));
            }
        }
    }
    let sents = split_sentences(full_text);
    if sents.is_empty() {
        return None;
    }
    Some(sents[..sents.len().min(max_sentences)].join(" "))
}

/// Scan sentences in order and keep those matching a contribution cue, up to
/// `max_sentences`. `None` when nothing matches.
pub fn extract_contributions(full_text: &str, max_sentences: usize) -> Option<String> {
    if full_text.trim().is_empty() {
        return None;
    }
    let mut selected: Vec<String> = Vec::new();
    for sent in split_sentences(full_text) {
        let low = sent.to_lowercase();
        if CONTRIBUTION_CUES.iter().any(|cue| cue.is_match(&low)) {
            selected.push(sent);
        }
        if selected.len() >= max_sentences {
            break;
        }
    }
    if selected.is_empty() {
        None
    } else {
        Some(selected.join(" "))
    }
}

/// Tiny TF-based keyword extractor: lower-case, punctuation to whitespace,
/// drop tokens of length <= 2 or in the stopword set, rank by frequency with
/// ties broken by first occurrence.
pub fn extract_keywords(text: &str, top_k: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, word) in cleaned.split_whitespace().enumerate() {
        if word.chars().count() <= 2 || STOPWORDS.contains(&word) {
            continue;
        }
        let entry = counts.entry(word).or_insert((0, idx));
        entry.0 += 1;
    }
    if counts.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(w, (count, first))| (w, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(top_k)
        .map(|(w, _, _)| w.to_string())
        .collect()
}
