//! research-scout — Binary Entrypoint
//! Parses CLI args, wires the backend configuration, and runs fetch cycles
//! once or on an interval until Ctrl-C.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use research_scout::agent::{run_cycle, run_single, Agent, CycleParams};
use research_scout::cli::Args;
use research_scout::output;
use research_scout::summarize::backend::BackendConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("research_scout=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

async fn run_once(agent: &Agent, args: &Args) -> Result<()> {
    let stamp = output::utc_stamp();
    info!(%stamp, "running fetch + summarize cycle");

    if let Some(id) = &args.arxiv_id {
        info!(%id, "fetching single arXiv id");
        let summarized = run_single(agent, id).await?;
        let path = output::save_json(
            &args.out_dir,
            &format!("{stamp}_arxiv_single_{id}.json"),
            &summarized,
        )?;
        info!(path = %path.display(), "saved single arXiv summary");
        return Ok(());
    }

    let params = CycleParams {
        arxiv_max: args.arxiv_max,
        arxiv_keywords: args.arxiv_keywords.clone(),
        github_max: args.github_max,
        github_keywords: args.github_keywords.clone(),
        github_language: args.github_language.clone(),
    };
    let envelope = run_cycle(agent, &params).await?;
    let (arxiv_path, github_path, meta_path) =
        output::save_envelope(&args.out_dir, &stamp, &envelope)?;

    info!(
        count = envelope.meta.arxiv_count,
        path = %arxiv_path.display(),
        "saved arXiv results"
    );
    info!(
        count = envelope.meta.github_count,
        path = %github_path.display(),
        "saved GitHub results"
    );
    info!(
        elapsed_secs = envelope.meta.elapsed_secs,
        path = %meta_path.display(),
        "saved cycle meta"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let cfg = BackendConfig::from_env(args.use_llm);
    let agent = Agent::new(&cfg);

    if args.once || args.interval == 0 {
        return run_once(&agent, &args).await;
    }

    info!(interval = args.interval, "starting polling; Ctrl+C to stop");
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_once(&agent, &args).await {
                    warn!(error = ?e, "cycle failed; will retry next tick");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopped by user");
                break;
            }
        }
    }
    Ok(())
}
