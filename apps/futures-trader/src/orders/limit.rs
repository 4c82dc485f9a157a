//! Limit order manager.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::gateway::{ExchangeGateway, OrderRecord};
use crate::session::Session;
use crate::validation;

use super::types::{OrderRequest, OrderResult};

/// Places GTC limit orders and manages resting orders.
#[derive(Debug)]
pub struct LimitOrderManager<G: ExchangeGateway> {
    session: Arc<Session<G>>,
}

impl<G: ExchangeGateway> LimitOrderManager<G> {
    /// Create a manager bound to a session.
    #[must_use]
    pub fn new(session: Arc<Session<G>>) -> Self {
        Self { session }
    }

    /// Place a limit order at the stated price.
    ///
    /// Validation (including tick alignment) runs against a fresh
    /// metadata snapshot; a rejected order returns `None` without any
    /// submission call. An accepted order makes exactly one submission
    /// call and at most one status fetch. Gateway failures are logged
    /// and also map to `None`.
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> Option<OrderResult> {
        let metadata = self.session.symbol_metadata(symbol).await;

        let side = match validation::validate_limit_order(
            metadata.as_ref(),
            symbol,
            side,
            quantity,
            price,
        ) {
            Ok(side) => side,
            Err(reason) => {
                tracing::warn!(symbol, %reason, "limit order rejected");
                return None;
            }
        };

        let request = OrderRequest::limit(symbol, side, quantity, price);
        tracing::info!(
            symbol = %request.symbol,
            side = %request.side,
            %quantity,
            %price,
            "placing limit order"
        );

        let record = match self.session.gateway().create_order(&request).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(symbol = %request.symbol, error = %e, "failed to place limit order");
                return None;
            }
        };

        tracing::info!(
            symbol = %request.symbol,
            order_id = record.order_id,
            "limit order placed"
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
            price: request.price,
            status,
            raw,
        })
    }

    /// Cancel a resting order. Returns whether the exchange accepted the
    /// cancellation; failures are logged.
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> bool {
        match self
            .session
            .gateway()
            .cancel_order(&symbol.to_uppercase(), order_id)
            .await
        {
            Ok(record) => {
                tracing::info!(symbol, order_id, status = %record.status, "order cancelled");
                true
            }
            Err(e) => {
                tracing::error!(symbol, order_id, error = %e, "failed to cancel order");
                false
            }
        }
    }

    /// List open orders, optionally filtered to one symbol. Failures are
    /// logged and map to an empty list.
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Vec<OrderRecord> {
        let upper = symbol.map(str::to_uppercase);
        match self
            .session
            .gateway()
            .get_open_orders(upper.as_deref())
            .await
        {
            Ok(orders) => {
                tracing::info!(count = orders.len(), "retrieved open orders");
                orders
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch open orders");
                Vec::new()
            }
        }
    }
}
