//! JSON persistence: one document per fetch category per run, named with a
//! UTC timestamp prefix.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::FetchEnvelope;

/// Filesystem-safe UTC stamp, e.g. `2025-08-23T14-05-09Z`.
pub fn utc_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string()
}

/// Write a value as pretty JSON under `dir`, creating the directory on
/// demand. Writes through a temp file so readers never see a partial
/// document.
pub fn save_json<T: Serialize>(dir: &Path, filename: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating output dir {}", dir.display()))?;
    let path = dir.join(filename);
    let json = serde_json::to_string_pretty(value).context("serializing output document")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("renaming into {}", path.display()))?;
    Ok(path)
}

/// Persist the three per-cycle documents: papers, repositories, meta.
pub fn save_envelope(
    dir: &Path,
    stamp: &str,
    envelope: &FetchEnvelope,
) -> Result<(PathBuf, PathBuf, PathBuf)> {
    let arxiv = save_json(dir, &format!("{stamp}_arxiv.json"), &envelope.papers)?;
    let github = save_json(dir, &format!("{stamp}_github.json"), &envelope.repos)?;
    let meta = save_json(dir, &format!("{stamp}_meta.json"), &envelope.meta)?;
    Ok((arxiv, github, meta))
}
