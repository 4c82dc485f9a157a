//! Wire types for the exchange REST API.
//!
//! Field names map directly to the Binance USDT-M Futures JSON format.
//! Numeric fields arrive as strings on the wire; `rust_decimal` parses
//! them losslessly. Unmodeled fields are retained in `extra` maps so raw
//! payloads survive a round-trip for audit logging.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exchange metadata: the symbol universe and its trading rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeInfo {
    /// All listed symbols.
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

/// Per-symbol entry from the exchange info response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// Trading pair, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Trading status, e.g. `TRADING`.
    pub status: String,
    /// Trading rule filters.
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

/// One entry of a symbol's filter list.
///
/// Filters are a tagged union on `filterType`; only the fields consumed
/// by validation are modeled, the rest deserialize to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolFilter {
    /// Discriminator, e.g. `LOT_SIZE` or `PRICE_FILTER`.
    pub filter_type: String,
    /// Minimum order quantity (`LOT_SIZE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<Decimal>,
    /// Minimum price increment (`PRICE_FILTER`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<Decimal>,
}

/// Account snapshot from `/fapi/v2/account`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Total wallet balance in USDT.
    #[serde(default)]
    pub total_wallet_balance: Option<Decimal>,
    /// Total unrealized profit across positions.
    #[serde(default)]
    pub total_unrealized_profit: Option<Decimal>,
    /// Total margin balance.
    #[serde(default)]
    pub total_margin_balance: Option<Decimal>,
    /// Balance available for new orders.
    #[serde(default)]
    pub available_balance: Option<Decimal>,
}

/// Order record as returned by the order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Exchange-assigned order identifier.
    pub order_id: i64,
    /// Trading pair.
    pub symbol: String,
    /// Exchange-defined status, e.g. `NEW`, `FILLED`, `CANCELED`.
    pub status: String,
    /// Order side.
    #[serde(default)]
    pub side: Option<String>,
    /// Order type.
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    /// Original order quantity.
    #[serde(default)]
    pub orig_qty: Option<Decimal>,
    /// Limit price; zero for market orders.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fill record from the account trade history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Trade identifier.
    pub id: i64,
    /// Order that produced this fill.
    pub order_id: i64,
    /// Trading pair.
    pub symbol: String,
    /// Taker side of the fill.
    #[serde(default)]
    pub side: Option<String>,
    /// Fill price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Fill quantity.
    #[serde(default)]
    pub qty: Option<Decimal>,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn exchange_info_parses_filters() {
        let json = r#"{
            "symbols": [{
                "symbol": "BTCUSDT",
                "status": "TRADING",
                "filters": [
                    {"filterType": "PRICE_FILTER", "tickSize": "0.10", "minPrice": "556.80"},
                    {"filterType": "LOT_SIZE", "minQty": "0.001", "stepSize": "0.001"},
                    {"filterType": "MARKET_LOT_SIZE", "minQty": "0.001"}
                ]
            }]
        }"#;

        let info: ExchangeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.symbols.len(), 1);
        let symbol = &info.symbols[0];
        assert_eq!(symbol.symbol, "BTCUSDT");
        assert_eq!(symbol.status, "TRADING");
        assert_eq!(symbol.filters[0].filter_type, "PRICE_FILTER");
        assert_eq!(symbol.filters[0].tick_size, Some(dec!(0.10)));
        assert_eq!(symbol.filters[1].min_qty, Some(dec!(0.001)));
    }

    #[test]
    fn account_info_defaults_missing_fields() {
        let info: AccountInfo = serde_json::from_str("{}").unwrap();
        assert!(info.total_wallet_balance.is_none());
        assert!(info.available_balance.is_none());
    }

    #[test]
    fn account_info_parses_string_decimals() {
        let json = r#"{
            "totalWalletBalance": "1000.5000",
            "totalUnrealizedProfit": "-12.25",
            "totalMarginBalance": "988.2500",
            "availableBalance": "900.0000"
        }"#;
        let info: AccountInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.total_wallet_balance, Some(dec!(1000.5)));
        assert_eq!(info.total_unrealized_profit, Some(dec!(-12.25)));
    }

    #[test]
    fn order_record_retains_unmodeled_fields() {
        let json = r#"{
            "orderId": 283194212,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "side": "BUY",
            "type": "LIMIT",
            "origQty": "0.001",
            "price": "100.00",
            "timeInForce": "GTC",
            "updateTime": 1698765432100
        }"#;

        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.order_id, 283_194_212);
        assert_eq!(record.status, "NEW");
        assert_eq!(record.extra.get("timeInForce"), Some(&Value::from("GTC")));

        let raw = serde_json::to_value(&record).unwrap();
        assert_eq!(raw["updateTime"], Value::from(1_698_765_432_100_i64));
    }

    #[test]
    fn trade_record_parses() {
        let json = r#"{
            "id": 91827,
            "orderId": 283194212,
            "symbol": "BTCUSDT",
            "side": "SELL",
            "price": "27100.10",
            "qty": "0.002",
            "realizedPnl": "1.24",
            "time": 1698765432100
        }"#;

        let trade: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trade.order_id, 283_194_212);
        assert_eq!(trade.qty, Some(dec!(0.002)));
        assert!(trade.extra.contains_key("realizedPnl"));
    }
}
