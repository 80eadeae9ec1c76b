use crate::errors::MarketError;
use crate::types::PricePoint;

/// Abstraction over the exchange the analyzer and monitor pull prices from.
///
/// Implementations must return series in ascending timestamp order, one point
/// per sampling interval, at most `lookback_hours` points.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Historical close series for one symbol.
    async fn fetch_series(
        &self,
        symbol: &str,
        lookback_hours: u32,
    ) -> Result<Vec<PricePoint>, MarketError>;

    /// Current executable price for one symbol (mid of best bid/ask).
    async fn latest_price(&self, symbol: &str) -> Result<f64, MarketError>;
}
