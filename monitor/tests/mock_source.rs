use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use market::errors::MarketError;
use market::source::PriceSource;
use market::types::PricePoint;

/// Price source whose ticker values are set by the test between polls.
#[derive(Default, Clone)]
pub struct ScriptedPrices {
    prices: Arc<Mutex<HashMap<String, f64>>>,
}

impl ScriptedPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, symbol: &str, price: f64) {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
    }

    pub fn clear(&self, symbol: &str) {
        self.prices.lock().unwrap().remove(symbol);
    }
}

#[async_trait]
impl PriceSource for ScriptedPrices {
    async fn fetch_series(
        &self,
        _symbol: &str,
        _lookback_hours: u32,
    ) -> Result<Vec<PricePoint>, MarketError> {
        Err(MarketError::InvalidResponse("no history in mock".into()))
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, MarketError> {
        self.prices
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketError::NoPrice {
                symbol: symbol.to_string(),
            })
    }
}
