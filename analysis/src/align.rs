//! Timestamp alignment of two candle series.
//!
//! Exchanges occasionally drop candles, and two symbols rarely share an
//! identical history. Everything downstream (spread, sweep) assumes
//! index-aligned prices, so both series are projected onto the sorted
//! intersection of their timestamps before any math happens.

use std::collections::HashMap;

use market::types::PricePoint;

/// Fewer aligned points than this (one day of hourly candles) is worth a
/// data-sparsity warning, but callers proceed anyway.
pub const MIN_COVERAGE: usize = 24;

/// Two equal-length price sequences, index-aligned by timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSeries {
    /// Strictly increasing common timestamps (epoch ms).
    pub timestamps: Vec<i64>,
    pub prices_a: Vec<f64>,
    pub prices_b: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn is_sparse(&self) -> bool {
        self.len() < MIN_COVERAGE
    }
}

/// Intersect two series on common timestamps.
///
/// Duplicate timestamps within one input are not expected; if present,
/// last-write-wins during lookup construction. An empty intersection yields
/// empty output sequences, never an error.
pub fn align(a: &[PricePoint], b: &[PricePoint]) -> AlignedSeries {
    let by_ts_a: HashMap<i64, f64> = a.iter().map(|p| (p.ts_ms, p.price)).collect();
    let by_ts_b: HashMap<i64, f64> = b.iter().map(|p| (p.ts_ms, p.price)).collect();

    let mut common: Vec<i64> = by_ts_a
        .keys()
        .filter(|ts| by_ts_b.contains_key(ts))
        .copied()
        .collect();
    common.sort_unstable();

    let mut out = AlignedSeries {
        timestamps: Vec::with_capacity(common.len()),
        prices_a: Vec::with_capacity(common.len()),
        prices_b: Vec::with_capacity(common.len()),
    };

    for ts in common {
        // both lookups are guaranteed by the intersection above
        let (Some(pa), Some(pb)) = (by_ts_a.get(&ts), by_ts_b.get(&ts)) else {
            continue;
        };
        out.timestamps.push(ts);
        out.prices_a.push(*pa);
        out.prices_b.push(*pb);
    }

    out
}
