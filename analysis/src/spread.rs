//! Normalized percentage spread between two legs.
//!
//! The cheaper leg is scaled up by the combination's coefficient before
//! comparison, correcting for contracts quoted at structurally different
//! magnitudes (the coefficient is typically a historical price ratio).
//!
//! The single-point form is shared by the offline sweep and the live
//! monitor so both agree on the same data.

/// Scale the cheaper of the two prices by `coef`. Returns `(a, b)` order.
pub fn scaled_pair(pa: f64, pb: f64, coef: f64) -> (f64, f64) {
    if pa < pb { (pa * coef, pb) } else { (pa, pb * coef) }
}

/// Spread% = |pa′ − pb′| / ((pa′ + pb′) / 2) × 100 over the scaled pair.
///
/// A zero mean (degenerate input, not expected in real data) is defined as
/// spread 0 rather than a division error.
pub fn spread_pct(pa: f64, pb: f64, coef: f64) -> f64 {
    let (sa, sb) = scaled_pair(pa, pb, coef);
    let mean = (sa + sb) / 2.0;
    if mean == 0.0 {
        0.0
    } else {
        (sa - sb).abs() / mean * 100.0
    }
}

/// Pointwise spread over two index-aligned price sequences.
///
/// Output length equals input length; values are non-negative.
pub fn spread_series(prices_a: &[f64], prices_b: &[f64], coef: f64) -> Vec<f64> {
    prices_a
        .iter()
        .zip(prices_b)
        .map(|(&pa, &pb)| spread_pct(pa, pb, coef))
        .collect()
}
