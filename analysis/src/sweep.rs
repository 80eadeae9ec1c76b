//! Threshold grid sweep.
//!
//! Enumerates every (open, close) threshold pair on a fixed step grid,
//! simulates the cycle detector against the spread series for each, and
//! keeps the most productive pairs.
//!
//! Thresholds are iterated as integer centi-percent counters rather than by
//! repeated floating addition, so the grid is covered exactly regardless of
//! rounding; only the final values handed to the detector are converted
//! back to f64.

use serde::{Deserialize, Serialize};

use crate::detector::count_cycles;

/// How many top results a report keeps per combination.
pub const TOP_RESULTS: usize = 5;

/// Grid bounds and steps, in spread percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub open_min: f64,
    pub open_max: f64,
    pub open_step: f64,
    pub close_step: f64,
    /// Minimum distance between open and close: close ranges over
    /// `[0, open - min_gap]`, and opens with `open - min_gap < 0` are
    /// skipped entirely.
    pub min_gap: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            open_min: 4.0,
            open_max: 30.0,
            open_step: 0.5,
            close_step: 0.5,
            min_gap: 4.0,
        }
    }
}

/// One simulated threshold pair and the cycles it would have produced.
///
/// Field names are part of the persisted report contract; do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    pub open: f64,
    pub close: f64,
    pub cycles: u32,
}

/// Threshold percent → integer centi-percent grid coordinate.
fn to_centi(v: f64) -> i64 {
    (v * 100.0).round() as i64
}

fn from_centi(c: i64) -> f64 {
    c as f64 / 100.0
}

/// Sweep the full threshold grid against one spread series.
///
/// Retains only pairs with at least one completed cycle, sorted by cycle
/// count descending; ties keep sweep order (ascending open, then ascending
/// close). At most [`TOP_RESULTS`] entries are returned. A grid that admits
/// no valid pair, or a series that never cycles, yields an empty vec — a
/// misconfigured grid is an empty report, not an error.
pub fn sweep(spreads: &[f64], cfg: &SweepConfig) -> Vec<CycleResult> {
    let open_min = to_centi(cfg.open_min);
    let open_max = to_centi(cfg.open_max);
    let open_step = to_centi(cfg.open_step);
    let close_step = to_centi(cfg.close_step);
    let min_gap = to_centi(cfg.min_gap);

    if open_step <= 0 || close_step <= 0 || open_min > open_max {
        return Vec::new();
    }

    let mut results = Vec::new();

    let mut open_c = open_min;
    while open_c <= open_max {
        let max_close = open_c - min_gap;
        if max_close >= 0 {
            let mut close_c = 0;
            while close_c <= max_close {
                let open = from_centi(open_c);
                let close = from_centi(close_c);

                let cycles = count_cycles(spreads, open, close);
                if cycles > 0 {
                    results.push(CycleResult {
                        open,
                        close,
                        cycles,
                    });
                }

                close_c += close_step;
            }
        }
        open_c += open_step;
    }

    // stable sort: equal counts keep ascending-open/ascending-close order
    results.sort_by(|a, b| b.cycles.cmp(&a.cycles));
    results.truncate(TOP_RESULTS);
    results
}
