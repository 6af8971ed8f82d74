//! Orchestrator: one fetch-and-summarize cycle across both categories.
//! Records are processed strictly one at a time in arrival order; the only
//! shared state is the read-only backend configuration.

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::fetch::{arxiv::ArxivFetcher, github::GithubFetcher};
use crate::summarize::backend::{BackendConfig, BackendSelector};
use crate::summarize::{summarize_paper, summarize_repo};
use crate::types::{CycleMeta, FetchEnvelope, PaperRecord, RepoRecord, SummarizedPaper};

/// Parameters for one bulk cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleParams {
    pub arxiv_max: usize,
    pub arxiv_keywords: String,
    pub github_max: usize,
    pub github_keywords: String,
    pub github_language: String,
}

pub struct Agent {
    selector: BackendSelector,
}

impl Agent {
    pub fn new(cfg: &BackendConfig) -> Self {
        Self {
            selector: BackendSelector::from_config(cfg),
        }
    }

    /// Agent with an explicit selector (tests, custom wiring).
    pub fn with_selector(selector: BackendSelector) -> Self {
        Self { selector }
    }

    /// Summarize both categories in input order and assemble the envelope.
    /// Elapsed time is measured from this call.
    pub async fn summarize_all(
        &self,
        papers: Vec<PaperRecord>,
        repos: Vec<RepoRecord>,
    ) -> FetchEnvelope {
        self.summarize_all_since(Instant::now(), papers, repos)
            .await
    }

    /// Like [`summarize_all`](Self::summarize_all), but with an explicit
    /// cycle start so `meta.elapsed_secs` covers the fetch phase too.
    pub async fn summarize_all_since(
        &self,
        cycle_start: Instant,
        papers: Vec<PaperRecord>,
        repos: Vec<RepoRecord>,
    ) -> FetchEnvelope {

        let mut out_papers = Vec::with_capacity(papers.len());
        for paper in papers {
            out_papers.push(summarize_paper(&self.selector, paper).await);
        }
        let mut out_repos = Vec::with_capacity(repos.len());
        for repo in repos {
            out_repos.push(summarize_repo(&self.selector, repo).await);
        }

        FetchEnvelope {
            meta: CycleMeta {
                arxiv_count: out_papers.len(),
                github_count: out_repos.len(),
                elapsed_secs: cycle_start.elapsed().as_secs_f64(),
            },
            papers: out_papers,
            repos: out_repos,
        }
    }

    pub async fn summarize_one_paper(&self, paper: PaperRecord) -> SummarizedPaper {
        summarize_paper(&self.selector, paper).await
    }
}

/// Run one full cycle against the live APIs. Elapsed time in the envelope
/// covers both fetches plus summarization.
pub async fn run_cycle(agent: &Agent, params: &CycleParams) -> Result<FetchEnvelope> {
    let cycle_start = Instant::now();
    let papers = ArxivFetcher::http()
        .fetch(params.arxiv_max, &params.arxiv_keywords, None)
        .await?;
    let repos = GithubFetcher::http()
        .fetch(
            params.github_max,
            &params.github_keywords,
            &params.github_language,
        )
        .await?;
    info!(
        papers = papers.len(),
        repos = repos.len(),
        "fetched both categories; summarizing"
    );
    Ok(agent.summarize_all_since(cycle_start, papers, repos).await)
}

/// Summarize one externally supplied arXiv id without the bulk search.
pub async fn run_single(agent: &Agent, arxiv_id: &str) -> Result<Vec<SummarizedPaper>> {
    let papers = ArxivFetcher::http().fetch(1, "", Some(arxiv_id)).await?;
    let mut out = Vec::with_capacity(papers.len());
    for paper in papers {
        out.push(agent.summarize_one_paper(paper).await);
    }
    Ok(out)
}
