// src/fetch/mod.rs
pub mod arxiv;
pub mod fulltext;
pub mod github;

use once_cell::sync::OnceCell;

/// Collapse all whitespace runs to single spaces and trim. API feeds wrap
/// titles and abstracts with hard line breaks.
pub fn collapse_ws(s: &str) -> String {
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").expect("valid whitespace pattern"));
    re.replace_all(s.trim(), " ").to_string()
}
