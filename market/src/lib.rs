pub mod binance;
pub mod errors;
pub mod source;
pub mod types;
