// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

/// Fetch recent arXiv CS papers and top GitHub repositories, summarize each,
/// and persist timestamped JSON documents.
#[derive(Parser, Debug, Clone)]
#[command(name = "research-scout", version)]
pub struct Args {
    /// Run one fetch cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Polling interval in seconds (0 means no loop)
    #[arg(long, default_value_t = 0)]
    pub interval: u64,

    /// Max number of arXiv results
    #[arg(long, default_value_t = 100)]
    pub arxiv_max: usize,

    /// Keywords for the arXiv search
    #[arg(long, default_value = "")]
    pub arxiv_keywords: String,

    /// Specific arXiv id to summarize (e.g. 2301.01234); skips the bulk search
    #[arg(long)]
    pub arxiv_id: Option<String>,

    /// Use an LLM backend for improved summaries (needs LOCAL_CHATBOX_URL or OPENAI_API_KEY)
    #[arg(long)]
    pub use_llm: bool,

    /// Max number of GitHub repos to fetch
    #[arg(long, default_value_t = 100)]
    pub github_max: usize,

    /// Keywords for the GitHub search
    #[arg(long, default_value = "")]
    pub github_keywords: String,

    /// Filter GitHub results by language
    #[arg(long, default_value = "")]
    pub github_language: String,

    /// Output directory for JSON documents
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,
}
