//! Binance USDⓈ-M Futures REST client.
//!
//! Two endpoints only:
//!   • `/fapi/v1/klines` — hourly candle closes for the offline analyzer
//!   • `/fapi/v1/ticker/bookTicker` — best bid/ask for the live monitor
//!
//! Kline rows arrive as heterogeneous JSON arrays; only the open time
//! (index 0) and close price (index 4) are kept.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::MarketError;
use crate::source::PriceSource;
use crate::types::PricePoint;

pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";

/// Bounded retry for the ticker call; the monitor polls frequently and a
/// single transient miss must not surface as a dead tick.
const TICKER_RETRIES: u32 = 3;
const TICKER_RETRY_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Deserialize)]
struct BookTicker {
    #[serde(rename = "bidPrice")]
    bid_price: String,
    #[serde(rename = "askPrice")]
    ask_price: String,
}

#[derive(Clone)]
pub struct BinanceFuturesClient {
    http: Client,
    base_url: String,
}

impl BinanceFuturesClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    #[instrument(skip(self), fields(symbol = %symbol), level = "debug")]
    async fn fetch_klines(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<PricePoint>, MarketError> {
        let url = format!("{}/fapi/v1/klines", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", "1h"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let rows: Vec<Vec<Value>> = resp.json().await?;

        let mut series = Vec::with_capacity(rows.len());
        for row in &rows {
            let ts_ms = row
                .first()
                .and_then(Value::as_i64)
                .ok_or_else(|| MarketError::InvalidResponse("kline open time".into()))?;
            let close: f64 = row
                .get(4)
                .and_then(Value::as_str)
                .ok_or_else(|| MarketError::InvalidResponse("kline close price".into()))?
                .parse()?;
            series.push(PricePoint::new(ts_ms, close));
        }

        debug!(symbol = %symbol, points = series.len(), "klines fetched");

        Ok(series)
    }

    async fn fetch_book_ticker_mid(&self, symbol: &str) -> Result<f64, MarketError> {
        let url = format!("{}/fapi/v1/ticker/bookTicker", self.base_url);

        for attempt in 0..TICKER_RETRIES {
            let result: Result<BookTicker, MarketError> = async {
                let resp = self
                    .http
                    .get(&url)
                    .query(&[("symbol", symbol)])
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(resp.json().await?)
            }
            .await;

            match result {
                Ok(ticker) => {
                    let bid: f64 = ticker.bid_price.parse()?;
                    let ask: f64 = ticker.ask_price.parse()?;
                    return Ok((bid + ask) / 2.0);
                }
                Err(e) => {
                    warn!(symbol = %symbol, attempt, error = %e, "book ticker fetch failed");
                    tokio::time::sleep(TICKER_RETRY_DELAY).await;
                }
            }
        }

        Err(MarketError::NoPrice {
            symbol: symbol.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PriceSource for BinanceFuturesClient {
    async fn fetch_series(
        &self,
        symbol: &str,
        lookback_hours: u32,
    ) -> Result<Vec<PricePoint>, MarketError> {
        self.fetch_klines(symbol, lookback_hours).await
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, MarketError> {
        self.fetch_book_ticker_mid(symbol).await
    }
}
