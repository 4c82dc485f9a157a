//! Market order manager.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::gateway::{ExchangeGateway, TradeRecord};
use crate::session::Session;
use crate::validation;

use super::types::{OrderRequest, OrderResult};

/// Places market orders and queries trade history.
#[derive(Debug)]
pub struct MarketOrderManager<G: ExchangeGateway> {
    session: Arc<Session<G>>,
}

impl<G: ExchangeGateway> MarketOrderManager<G> {
    /// Create a manager bound to a session.
    #[must_use]
    pub fn new(session: Arc<Session<G>>) -> Self {
        Self { session }
    }

    /// Place a market order.
    ///
    /// Validation runs against a fresh metadata snapshot; a rejected
    /// order returns `None` without any submission call. An accepted
    /// order makes exactly one submission call and at most one status
    /// fetch. Gateway failures are logged and also map to `None`.
    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
    ) -> Option<OrderResult> {
        let metadata = self.session.symbol_metadata(symbol).await;

        let side = match validation::validate_market_order(metadata.as_ref(), symbol, side, quantity)
        {
            Ok(side) => side,
            Err(reason) => {
                tracing::warn!(symbol, %reason, "market order rejected");
                return None;
            }
        };

        let request = OrderRequest::market(symbol, side, quantity);
        tracing::info!(
            symbol = %request.symbol,
            side = %request.side,
            %quantity,
            "placing market order"
        );

        let record = match self.session.gateway().create_order(&request).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(symbol = %request.symbol, error = %e, "failed to place market order");
                return None;
            }
        };

        tracing::info!(
            symbol = %request.symbol,
            order_id = record.order_id,
            "market order placed"
        );

        let status = super::fetch_status(self.session.gateway(), &request.symbol, record.order_id)
            .await;
        let raw = serde_json::to_value(&record).unwrap_or(Value::Null);

        Some(OrderResult {
            order_id: record.order_id,
            symbol: request.symbol,
            side: request.side,
            quantity: request.quantity,
            kind: request.kind,
            price: None,
            status,
            raw,
        })
    }

    /// Fetch recent account trades for a symbol. Failures are logged and
    /// map to an empty list.
    pub async fn get_recent_trades(&self, symbol: &str, limit: u32) -> Vec<TradeRecord> {
        match self
            .session
            .gateway()
            .get_account_trades(&symbol.to_uppercase(), limit)
            .await
        {
            Ok(trades) => {
                tracing::info!(symbol, count = trades.len(), "retrieved recent trades");
                trades
            }
            Err(e) => {
                tracing::error!(symbol, error = %e, "failed to fetch recent trades");
                Vec::new()
            }
        }
    }
}
