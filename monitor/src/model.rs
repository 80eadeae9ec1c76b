use analysis::detector::DetectorState;
use market::types::Combination;
use serde::{Deserialize, Serialize};

/// Durable per-combination monitor state.
///
/// Checkpointed after every detector transition so a restart resumes with
/// the open/close history intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorState {
    pub detector: DetectorState,
    /// Unix seconds of each completed cycle, in completion order.
    pub cycle_ts: Vec<i64>,
}

impl MonitorState {
    pub fn cycles_since(&self, cutoff_s: i64) -> usize {
        self.cycle_ts.iter().filter(|&&t| t >= cutoff_s).count()
    }
}

/// Live alerting thresholds for one combination, in spread percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub open: f64,
    pub close: f64,
}

/// One combination under live watch.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorEntry {
    pub combo: Combination,
    pub thresholds: AlertThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Opened,
    Closed,
}

/// Emitted on every detector transition, after the state checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub key: String,
    pub spread_pct: f64,
    pub coef: f64,
    /// Cheaper (scaled-up) leg — the one to be long.
    pub long_leg: String,
    /// Richer leg — the one to be short.
    pub short_leg: String,
}
