//! Binance USDT-M Futures adapter.
//!
//! Implements [`crate::gateway::ExchangeGateway`] over the venue's signed
//! REST API (HMAC-SHA256 query-string signatures, `X-MBX-APIKEY` header).

mod config;
mod error;
mod http_client;
mod sign;

pub use config::{BinanceConfig, BinanceEnvironment};
pub use error::BinanceError;
pub use http_client::BinanceFuturesGateway;
pub use sign::RequestSigner;
