//! Analysis run orchestration.
//!
//! For each configured combination: fetch both candle series (cached per
//! symbol within the run, so legs shared across combinations are fetched
//! once), align on common timestamps, derive the spread series, sweep the
//! threshold grid, and collect the per-combination results into one report.
//!
//! A failed fetch skips that combination and the run continues — a single
//! data-source failure must never abort the whole analysis. The only fatal
//! errors live at the caller's persistence boundary.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, instrument, warn};

use market::source::PriceSource;
use market::types::{Combination, PricePoint};

use crate::align::align;
use crate::report::AnalysisReport;
use crate::spread::spread_series;
use crate::sweep::{CycleResult, SweepConfig, sweep};

/// 30 days of hourly candles.
pub const LOOKBACK_HOURS: u32 = 30 * 24;

/// Run the full grid-search analysis over every configured combination.
///
/// Synchronous from the caller's point of view: the sweep itself is bounded
/// and deterministic, only the fetches await. May take minutes for a long
/// combination list; callers decide whether to background it.
#[instrument(skip_all, fields(combinations = combinations.len()))]
pub async fn run_analysis<S>(
    combinations: &[Combination],
    source: &S,
    cfg: &SweepConfig,
) -> AnalysisReport
where
    S: PriceSource + ?Sized,
{
    let mut cache: HashMap<String, Vec<PricePoint>> = HashMap::new();
    let mut pairs = BTreeMap::new();

    for combo in combinations {
        let key = combo.key();

        match analyze_combination(combo, source, cfg, &mut cache).await {
            Some(results) => {
                info!(pair = %key, results = results.len(), "combination analyzed");
                pairs.insert(key, results);
            }
            None => {
                warn!(pair = %key, "combination skipped: data unavailable");
            }
        }
    }

    AnalysisReport::new(pairs)
}

/// Analyze one combination; `None` means a leg could not be fetched.
async fn analyze_combination<S>(
    combo: &Combination,
    source: &S,
    cfg: &SweepConfig,
    cache: &mut HashMap<String, Vec<PricePoint>>,
) -> Option<Vec<CycleResult>>
where
    S: PriceSource + ?Sized,
{
    if !ensure_cached(cache, source, &combo.base).await
        || !ensure_cached(cache, source, &combo.quote).await
    {
        return None;
    }

    let series_a = cache.get(&combo.base)?;
    let series_b = cache.get(&combo.quote)?;

    let aligned = align(series_a, series_b);

    if aligned.is_sparse() {
        warn!(
            pair = %combo.key(),
            common_points = aligned.len(),
            "few common candles; proceeding anyway"
        );
    }

    let spreads = spread_series(&aligned.prices_a, &aligned.prices_b, combo.coef);

    Some(sweep(&spreads, cfg))
}

/// Fetch-once semantics for the per-run series cache.
async fn ensure_cached<S>(
    cache: &mut HashMap<String, Vec<PricePoint>>,
    source: &S,
    symbol: &str,
) -> bool
where
    S: PriceSource + ?Sized,
{
    if cache.contains_key(symbol) {
        return true;
    }

    match source.fetch_series(symbol, LOOKBACK_HOURS).await {
        Ok(series) => {
            cache.insert(symbol.to_string(), series);
            true
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "series fetch failed");
            false
        }
    }
}
