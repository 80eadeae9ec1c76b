use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from exchange: {0}")]
    InvalidResponse(String),

    #[error("numeric parse error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("no price available for {symbol}")]
    NoPrice { symbol: String },
}
