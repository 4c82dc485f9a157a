//! Exchange gateway port and adapters.
//!
//! [`ExchangeGateway`] is the exact method set this client consumes from
//! the exchange, so a test double can substitute for the real venue. The
//! Binance USDT-M Futures adapter lives in [`binance`].

pub mod binance;
mod types;

pub use types::{AccountInfo, ExchangeInfo, OrderRecord, SymbolFilter, SymbolInfo, TradeRecord};

use async_trait::async_trait;

use crate::orders::OrderRequest;

/// Failure from any exchange-facing call.
///
/// Managers treat every variant the same way: log it with context and
/// report an absent result. Nothing here is retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, timeout, TLS, read).
    #[error("network error: {0}")]
    Network(String),

    /// The exchange answered with an error payload.
    #[error("exchange error {code}: {message}")]
    Api {
        /// Exchange error code.
        code: i64,
        /// Exchange error message.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Credentials were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// The remote trading venue, as seen by this client.
///
/// One blocking-style call per method; timeout policy is delegated to the
/// underlying HTTP transport.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Fetch the full symbol universe and trading rules.
    async fn get_exchange_info(&self) -> Result<ExchangeInfo, GatewayError>;

    /// Fetch the account balance snapshot.
    async fn get_account_info(&self) -> Result<AccountInfo, GatewayError>;

    /// Submit a validated order.
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, GatewayError>;

    /// Fetch a single order by exchange id.
    async fn get_order(&self, symbol: &str, order_id: i64) -> Result<OrderRecord, GatewayError>;

    /// Cancel a resting order.
    async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderRecord, GatewayError>;

    /// List open orders, optionally filtered to one symbol.
    async fn get_open_orders(&self, symbol: Option<&str>)
    -> Result<Vec<OrderRecord>, GatewayError>;

    /// Fetch recent account trades for a symbol.
    async fn get_account_trades(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<TradeRecord>, GatewayError>;
}
