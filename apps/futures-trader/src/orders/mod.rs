//! Order placement and management.
//!
//! The managers run the validation pipeline, submit at most one order
//! per invocation, and normalize gateway responses into [`OrderResult`]
//! records. Callers see only present/absent results; the logs carry the
//! failure detail.

mod limit;
mod market;
mod types;

pub use limit::LimitOrderManager;
pub use market::MarketOrderManager;
pub use types::{OrderKind, OrderRequest, OrderResult, OrderSide};

use crate::gateway::ExchangeGateway;

/// Fetch the current status of a just-submitted order.
///
/// A failed fetch leaves the order in the "submitted, status unknown"
/// state: the failure is logged and the caller gets `None` for the
/// status, not an absent result.
async fn fetch_status<G: ExchangeGateway>(
    gateway: &G,
    symbol: &str,
    order_id: i64,
) -> Option<String> {
    match gateway.get_order(symbol, order_id).await {
        Ok(record) => Some(record.status),
        Err(e) => {
            tracing::error!(symbol, order_id, error = %e, "failed to fetch order status");
            None
        }
    }
}
