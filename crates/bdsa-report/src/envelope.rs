//! JSON report envelope.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::hash::sha256_file;

/// One input file that contributed to a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputRecord {
    /// `dataset`, `schema`, `dictionary` or `mapping`.
    pub role: String,
    pub path: PathBuf,
    pub sha256: String,
}

impl InputRecord {
    pub fn from_path(role: impl Into<String>, path: &Path) -> Result<Self> {
        Ok(Self {
            role: role.into(),
            path: path.to_path_buf(),
            sha256: sha256_file(path)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope<T> {
    pub generated_at: DateTime<Utc>,
    pub inputs: Vec<InputRecord>,
    pub rows: usize,
    pub report: T,
}

impl<T: Serialize> ReportEnvelope<T> {
    pub fn new(rows: usize, report: T) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs: Vec::new(),
            rows,
            report,
        }
    }

    pub fn with_input(mut self, input: InputRecord) -> Self {
        self.inputs.push(input);
        self
    }
}

/// Pretty-printed JSON, newline terminated.
pub fn write_envelope<T: Serialize>(envelope: &ReportEnvelope<T>, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(envelope).context("serialize report")?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}
