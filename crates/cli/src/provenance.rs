//! Provenance sidecars for exported polar data.
//!
//! Every export gets a `<artifact>.provenance.json` next to it describing the
//! source file, the diagram that produced the rows and the configuration used.

use anyhow::{Context, Result};
use sailpolar::api::{Diagram, DiagramCfg, Format};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The polar file an export was read from.
#[derive(Debug, Serialize)]
pub struct InputRecord {
    pub path: String,
    pub bytes: u64,
    pub format: &'static str,
}

impl InputRecord {
    pub fn inspect(path: &Path, format: Format) -> Result<Self> {
        let meta = fs::metadata(path).with_context(|| format!("inspecting {}", path.display()))?;
        Ok(Self {
            path: path.to_string_lossy().into_owned(),
            bytes: meta.len(),
            format: format.tag(),
        })
    }
}

/// Shape of the diagram whose triples were exported.
#[derive(Debug, Serialize)]
pub struct DiagramRecord {
    pub repr: &'static str,
    pub symmetrized: bool,
    pub speeds: Vec<f64>,
    pub max_angle: f64,
    pub rows: usize,
}

impl DiagramRecord {
    pub fn describe(diagram: &Diagram, symmetrized: bool, rows: usize) -> Self {
        Self {
            repr: diagram.repr().name(),
            symmetrized,
            speeds: diagram.speeds(),
            max_angle: diagram.max_angle(),
            rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub sailpolar: &'static str,
    pub input: InputRecord,
    pub diagram: DiagramRecord,
    pub cfg: DiagramCfg,
}

impl Sidecar {
    pub fn new(input: InputRecord, diagram: DiagramRecord, cfg: DiagramCfg) -> Self {
        Self {
            code_rev: current_git_rev(),
            sailpolar: sailpolar::VERSION,
            input,
            diagram,
            cfg,
        }
    }

    /// Write the sidecar beside `artifact` and return its path.
    pub fn write_beside(&self, artifact: &Path) -> Result<PathBuf> {
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let runtime = std::env::var("GIT_COMMIT").ok();
    if let Some(rev) = [option_env!("GIT_COMMIT"), runtime.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
    {
        return rev.to_string();
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
