use serde::{Deserialize, Serialize};

/// One sampled candle close: open time in epoch milliseconds plus close price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub ts_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(ts_ms: i64, price: f64) -> Self {
        Self { ts_ms, price }
    }
}

/// Two correlated contracts analyzed together.
///
/// `coef` corrects for legs quoted at structurally different magnitudes:
/// the cheaper leg is multiplied by it before any spread computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub base: String,
    pub quote: String,
    #[serde(default = "default_coef")]
    pub coef: f64,
}

fn default_coef() -> f64 {
    1.0
}

impl Combination {
    pub fn new(base: impl Into<String>, quote: impl Into<String>, coef: f64) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            coef,
        }
    }

    /// Stable report/store key, e.g. `"BTCUSDT-ETHUSDT"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }
}
