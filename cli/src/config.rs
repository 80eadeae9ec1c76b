//! Combinations file loading.
//!
//! The on-disk format is one JSON object keyed by the first leg's symbol:
//!
//! ```json
//! {
//!   "BTCUSDT": { "pair2": "ETHUSDT", "coef": 1.0, "open": 9.0, "close": 2.0 }
//! }
//! ```
//!
//! `open`/`close` are the live-monitor alert thresholds; the analyzer only
//! needs `pair2` and `coef`. Missing `open` defaults high enough that the
//! monitor never fires until the analyzer has recommended a value.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use market::types::Combination;
use monitor::model::{AlertThresholds, MonitorEntry};

#[derive(Debug, Deserialize)]
struct PairEntry {
    pair2: String,
    #[serde(default = "default_coef")]
    coef: f64,
    #[serde(default = "default_open")]
    open: f64,
    #[serde(default = "default_close")]
    close: f64,
}

fn default_coef() -> f64 {
    1.0
}

fn default_open() -> f64 {
    9999.0
}

fn default_close() -> f64 {
    1.0
}

pub fn load_entries(path: &Path) -> anyhow::Result<Vec<MonitorEntry>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read combinations from {}", path.display()))?;

    // BTreeMap keeps combination order deterministic across runs
    let raw: BTreeMap<String, PairEntry> = serde_json::from_str(&json)?;

    Ok(raw
        .into_iter()
        .map(|(base, entry)| MonitorEntry {
            combo: Combination::new(base, entry.pair2, entry.coef),
            thresholds: AlertThresholds {
                open: entry.open,
                close: entry.close,
            },
        })
        .collect())
}

pub fn combinations(entries: &[MonitorEntry]) -> Vec<Combination> {
    entries.iter().map(|e| e.combo.clone()).collect()
}
