//! Two-state open/close cycle detector.
//!
//! One *cycle* is a spread excursion that reaches the open threshold and
//! later comes back down to the close threshold. The transition logic lives
//! in a single pure [`step`] function: the batch sweep folds it over a full
//! spread series, the live monitor feeds it one tick at a time, and both
//! are guaranteed to count identically on the same data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Detector position between samples.
///
/// There is no terminal state: a series may end mid-excursion, in which
/// case the pending open does not count as a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorState {
    #[default]
    WaitingOpen,
    WaitingClose,
}

impl fmt::Display for DetectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetectorState::WaitingOpen => "WaitingOpen",
            DetectorState::WaitingClose => "WaitingClose",
        };
        f.write_str(s)
    }
}

impl FromStr for DetectorState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WaitingOpen" => Ok(DetectorState::WaitingOpen),
            "WaitingClose" => Ok(DetectorState::WaitingClose),
            other => Err(anyhow::anyhow!("Invalid DetectorState value: {}", other)),
        }
    }
}

/// Advance the detector by one spread sample.
///
/// Returns the next state and whether this sample completed a cycle.
/// Pure and deterministic; all persistence and I/O live with the caller.
pub fn step(
    state: DetectorState,
    value: f64,
    open_thr: f64,
    close_thr: f64,
) -> (DetectorState, bool) {
    match state {
        DetectorState::WaitingOpen if value >= open_thr => (DetectorState::WaitingClose, false),
        DetectorState::WaitingClose if value <= close_thr => (DetectorState::WaitingOpen, true),
        unchanged => (unchanged, false),
    }
}

/// Count completed open→close cycles over a full spread series.
///
/// O(n), no side effects. Result is bounded by `spreads.len() / 2` since a
/// cycle consumes at least two samples.
pub fn count_cycles(spreads: &[f64], open_thr: f64, close_thr: f64) -> u32 {
    let mut state = DetectorState::WaitingOpen;
    let mut count = 0u32;

    for &value in spreads {
        let (next, cycle_done) = step(state, value, open_thr, close_thr);
        state = next;
        if cycle_done {
            count += 1;
        }
    }

    count
}
