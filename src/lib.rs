// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod agent;
pub mod cli;
pub mod fetch;
pub mod heuristics;
pub mod output;
pub mod summarize;
pub mod types;

// ---- Re-exports for stable public API ----
pub use agent::{Agent, CycleParams};
pub use summarize::backend::{BackendConfig, BackendSelector, GenProvider};
pub use types::{FetchEnvelope, PaperRecord, RepoRecord, SummarizedPaper, SummarizedRepo};
