//! Order domain types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy.
    Buy,
    /// Sell.
    Sell,
}

impl OrderSide {
    /// Wire representation used by the exchange.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    /// Immediate execution at the prevailing price.
    Market,
    /// Resting order at a stated price.
    Limit,
}

impl OrderKind {
    /// Wire representation used by the exchange.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated order, ready for submission.
///
/// The order managers construct one of these only after the validation
/// pipeline has certified symbol, quantity, and (for limit orders) price
/// against the current symbol metadata snapshot. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Trading pair, upper-cased.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order quantity.
    pub quantity: Decimal,
    /// Market or limit.
    pub kind: OrderKind,
    /// Limit price; `None` for market orders.
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// Build a market order request.
    #[must_use]
    pub fn market(symbol: &str, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            quantity,
            kind: OrderKind::Market,
            price: None,
        }
    }

    /// Build a limit order request. Limit orders are submitted GTC.
    #[must_use]
    pub fn limit(symbol: &str, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            quantity,
            kind: OrderKind::Limit,
            price: Some(price),
        }
    }
}

/// Outcome of an accepted submission.
///
/// Snapshot taken at submission time; never mutated afterwards. A fresh
/// `orders` query is needed to observe later status changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    /// Exchange-assigned order identifier.
    pub order_id: i64,
    /// Trading pair, upper-cased.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order quantity.
    pub quantity: Decimal,
    /// Market or limit.
    pub kind: OrderKind,
    /// Limit price; `None` for market orders.
    pub price: Option<Decimal>,
    /// Status from the post-submission fetch; `None` when that fetch
    /// failed (order submitted, status unknown).
    pub status: Option<String>,
    /// Raw exchange response payload, retained for audit.
    pub raw: Value,
}
