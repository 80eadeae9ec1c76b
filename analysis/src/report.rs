//! Persisted analysis report.
//!
//! The JSON layout (`generated_at` + `pairs` keyed by `"BASE-QUOTE"`, each
//! holding up to five `{open, close, cycles}` records in descending cycle
//! order) is the durable contract with report readers; it is rewritten
//! wholesale on each run, never merged.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::sweep::CycleResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// UTC generation time, `%Y-%m-%dT%H:%M:%SZ`.
    pub generated_at: String,
    pub pairs: BTreeMap<String, Vec<CycleResult>>,
}

impl AnalysisReport {
    pub fn new(pairs: BTreeMap<String, Vec<CycleResult>>) -> Self {
        Self {
            generated_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            pairs,
        }
    }

    /// Write the report, fully replacing any previous file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
