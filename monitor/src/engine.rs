//! Live spread monitor.
//!
//! Polls current prices for every watched combination on a fixed interval,
//! feeds each new spread sample through the same pure detector step the
//! offline sweep uses, and emits an `Alert` on every open/close transition.
//!
//! State is checkpointed to the injected `StateStore` *before* the alert is
//! sent, so a crash between transition and notification can at worst drop
//! one alert, never a state change.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc::Sender;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use analysis::detector::{DetectorState, step};
use analysis::spread::{scaled_pair, spread_pct};
use market::source::PriceSource;

use crate::model::{Alert, AlertKind, MonitorEntry, MonitorState};
use crate::store::StateStore;

#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
        }
    }
}

pub struct MonitorEngine<S: StateStore, P: PriceSource> {
    cfg: MonitorConfig,
    entries: Vec<MonitorEntry>,
    source: Arc<P>,
    store: Arc<S>,
    states: HashMap<String, MonitorState>,
    alert_tx: Sender<Alert>,
}

impl<S: StateStore, P: PriceSource> MonitorEngine<S, P> {
    /// Build an engine, restoring detector state from the store.
    pub async fn new(
        cfg: MonitorConfig,
        entries: Vec<MonitorEntry>,
        source: Arc<P>,
        store: Arc<S>,
        alert_tx: Sender<Alert>,
    ) -> anyhow::Result<Self> {
        let states = store.load_all().await?;

        Ok(Self {
            cfg,
            entries,
            source,
            store,
            states,
            alert_tx,
        })
    }

    /// Cooperative polling loop; runs until the task is dropped.
    ///
    /// Price-fetch failures skip the affected combination for that tick;
    /// store failures are fatal — the monitor must not keep running without
    /// its durable checkpoint.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut ticker = interval(self.cfg.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            combinations = self.entries.len(),
            every_ms = self.cfg.poll_interval.as_millis() as u64,
            "spread monitor started"
        );

        loop {
            ticker.tick().await;
            self.poll_once(now_unix_s()).await?;
        }
    }

    /// One full pass over all watched combinations.
    pub async fn poll_once(&mut self, now_s: i64) -> anyhow::Result<()> {
        let entries = self.entries.clone();

        for entry in &entries {
            self.poll_entry(entry, now_s).await?;
        }

        Ok(())
    }

    async fn poll_entry(&mut self, entry: &MonitorEntry, now_s: i64) -> anyhow::Result<()> {
        let combo = &entry.combo;
        let key = combo.key();

        let price_a = match self.source.latest_price(&combo.base).await {
            Ok(p) => p,
            Err(e) => {
                warn!(symbol = %combo.base, error = %e, "price unavailable, skipping tick");
                return Ok(());
            }
        };
        let price_b = match self.source.latest_price(&combo.quote).await {
            Ok(p) => p,
            Err(e) => {
                warn!(symbol = %combo.quote, error = %e, "price unavailable, skipping tick");
                return Ok(());
            }
        };

        let spread = spread_pct(price_a, price_b, combo.coef);

        let state = self.states.entry(key.clone()).or_default();
        let (next, cycle_done) = step(
            state.detector,
            spread,
            entry.thresholds.open,
            entry.thresholds.close,
        );

        if next == state.detector {
            debug!(pair = %key, spread_pct = spread, state = %state.detector, "no transition");
            return Ok(());
        }

        state.detector = next;
        if cycle_done {
            state.cycle_ts.push(now_s);
        }
        let snapshot = state.clone();

        // checkpoint before notifying
        self.store.save(&key, &snapshot).await?;

        let (long_leg, short_leg) = direction_legs(combo, price_a, price_b);
        let kind = if next == DetectorState::WaitingClose {
            AlertKind::Opened
        } else {
            AlertKind::Closed
        };

        info!(
            pair = %key,
            spread_pct = spread,
            kind = ?kind,
            long = %long_leg,
            short = %short_leg,
            "spread transition"
        );

        let _ = self
            .alert_tx
            .send(Alert {
                kind,
                key,
                spread_pct: spread,
                coef: combo.coef,
                long_leg,
                short_leg,
            })
            .await;

        Ok(())
    }

    /// Current state for one combination key.
    pub fn state(&self, key: &str) -> Option<&MonitorState> {
        self.states.get(key)
    }

    /// Completed-cycle counts per combination over a trailing window,
    /// busiest first.
    pub fn cycle_counts_since(&self, cutoff_s: i64) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .states
            .iter()
            .map(|(key, st)| (key.clone(), st.cycles_since(cutoff_s)))
            .collect();

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Cheaper (scaled) leg goes long, richer leg goes short.
fn direction_legs(combo: &market::types::Combination, price_a: f64, price_b: f64) -> (String, String) {
    let (scaled_a, scaled_b) = scaled_pair(price_a, price_b, combo.coef);
    if scaled_a > scaled_b {
        (combo.quote.clone(), combo.base.clone())
    } else {
        (combo.base.clone(), combo.quote.clone())
    }
}

fn now_unix_s() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
