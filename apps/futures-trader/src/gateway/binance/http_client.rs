//! Signed HTTP client for the Binance USDT-M Futures REST API.
//!
//! Every call is a single attempt: the reqwest timeout is the only
//! deadline and nothing is retried. Failures surface as [`BinanceError`]
//! and are mapped to [`GatewayError`] at the trait boundary.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::gateway::{
    AccountInfo, ExchangeGateway, ExchangeInfo, GatewayError, OrderRecord, TradeRecord,
};
use crate::orders::{OrderKind, OrderRequest};

use super::config::{BinanceConfig, BinanceEnvironment};
use super::error::BinanceError;
use super::sign::{RequestSigner, build_query_string};

/// Error payload shape used by the Binance API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
}

/// Binance USDT-M Futures gateway.
///
/// Implements [`ExchangeGateway`] over the venue's signed REST API.
#[derive(Debug, Clone)]
pub struct BinanceFuturesGateway {
    client: Client,
    api_key: String,
    signer: RequestSigner,
    base_url: String,
    environment: BinanceEnvironment,
    recv_window_ms: u64,
}

impl BinanceFuturesGateway {
    /// Create a new gateway from config.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(BinanceError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinanceError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            signer: RequestSigner::new(config.api_secret.clone()),
            base_url: config.rest_base_url().to_string(),
            environment: config.environment,
            recv_window_ms: config.recv_window_ms,
        })
    }

    /// Override the base URL. Test hook for pointing at a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check whether the gateway points at the production environment.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Current timestamp in milliseconds for signed requests.
    fn timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Execute one request. Signed requests get `recvWindow`, `timestamp`
    /// and `signature` appended to the query string, in that order.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        mut params: Vec<(String, String)>,
        signed: bool,
    ) -> Result<T, BinanceError> {
        if signed {
            params.push(("recvWindow".to_string(), self.recv_window_ms.to_string()));
            params.push(("timestamp".to_string(), Self::timestamp_ms().to_string()));
            let query = build_query_string(&params);
            params.push(("signature".to_string(), self.signer.sign(&query)));
        }

        let query = build_query_string(&params);
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };

        let response = self
            .client
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| BinanceError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BinanceError::Http(e.to_string()))?;

        if status.is_success() {
            let text = if body.is_empty() { "null" } else { &body };
            return serde_json::from_str(text).map_err(|e| BinanceError::JsonParse(e.to_string()));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BinanceError::AuthenticationFailed);
        }

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => Err(BinanceError::Api {
                code: err.code.unwrap_or_else(|| i64::from(status.as_u16())),
                message: err.msg.unwrap_or(body),
            }),
            Err(_) => Err(BinanceError::Api {
                code: i64::from(status.as_u16()),
                message: body,
            }),
        }
    }

    /// Convert an order request into wire parameters.
    fn order_params(request: &OrderRequest) -> Vec<(String, String)> {
        let mut params = vec![
            ("symbol".to_string(), request.symbol.clone()),
            ("side".to_string(), request.side.as_str().to_string()),
            ("type".to_string(), request.kind.as_str().to_string()),
            (
                "quantity".to_string(),
                request.quantity.normalize().to_string(),
            ),
        ];

        if request.kind == OrderKind::Limit {
            // Resting orders stay open until filled or cancelled.
            params.push(("timeInForce".to_string(), "GTC".to_string()));
            if let Some(price) = request.price {
                params.push(("price".to_string(), price.normalize().to_string()));
            }
        }

        params
    }
}

#[async_trait]
impl ExchangeGateway for BinanceFuturesGateway {
    async fn get_exchange_info(&self) -> Result<ExchangeInfo, GatewayError> {
        self.request(Method::GET, "/fapi/v1/exchangeInfo", Vec::new(), false)
            .await
            .map_err(GatewayError::from)
    }

    async fn get_account_info(&self) -> Result<AccountInfo, GatewayError> {
        self.request(Method::GET, "/fapi/v2/account", Vec::new(), true)
            .await
            .map_err(GatewayError::from)
    }

    async fn create_order(&self, request: &OrderRequest) -> Result<OrderRecord, GatewayError> {
        if self.is_production() {
            tracing::warn!(
                symbol = %request.symbol,
                side = %request.side,
                "submitting PRODUCTION order - this will execute a real trade"
            );
        }

        self.request(
            Method::POST,
            "/fapi/v1/order",
            Self::order_params(request),
            true,
        )
        .await
        .map_err(GatewayError::from)
    }

    async fn get_order(&self, symbol: &str, order_id: i64) -> Result<OrderRecord, GatewayError> {
        let params = vec![
            ("symbol".to_string(), symbol.to_uppercase()),
            ("orderId".to_string(), order_id.to_string()),
        ];
        self.request(Method::GET, "/fapi/v1/order", params, true)
            .await
            .map_err(GatewayError::from)
    }

    async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderRecord, GatewayError> {
        let params = vec![
            ("symbol".to_string(), symbol.to_uppercase()),
            ("orderId".to_string(), order_id.to_string()),
        ];
        self.request(Method::DELETE, "/fapi/v1/order", params, true)
            .await
            .map_err(GatewayError::from)
    }

    async fn get_open_orders(
        &self,
        symbol: Option<&str>,
    ) -> Result<Vec<OrderRecord>, GatewayError> {
        let mut params = Vec::new();
        if let Some(symbol) = symbol {
            params.push(("symbol".to_string(), symbol.to_uppercase()));
        }
        self.request(Method::GET, "/fapi/v1/openOrders", params, true)
            .await
            .map_err(GatewayError::from)
    }

    async fn get_account_trades(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<TradeRecord>, GatewayError> {
        let params = vec![
            ("symbol".to_string(), symbol.to_uppercase()),
            ("limit".to_string(), limit.to_string()),
        ];
        self.request(Method::GET, "/fapi/v1/userTrades", params, true)
            .await
            .map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderSide;
    use rust_decimal_macros::dec;

    fn test_config() -> BinanceConfig {
        BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            BinanceEnvironment::Testnet,
        )
    }

    #[test]
    fn new_rejects_empty_credentials() {
        let config = BinanceConfig::new(
            String::new(),
            String::new(),
            BinanceEnvironment::Testnet,
        );
        assert!(matches!(
            BinanceFuturesGateway::new(&config),
            Err(BinanceError::AuthenticationFailed)
        ));
    }

    #[test]
    fn market_order_params() {
        let request = OrderRequest::market("BTCUSDT", OrderSide::Buy, dec!(0.001));
        let params = BinanceFuturesGateway::order_params(&request);

        assert_eq!(
            params,
            vec![
                ("symbol".to_string(), "BTCUSDT".to_string()),
                ("side".to_string(), "BUY".to_string()),
                ("type".to_string(), "MARKET".to_string()),
                ("quantity".to_string(), "0.001".to_string()),
            ]
        );
    }

    #[test]
    fn limit_order_params_include_gtc_and_price() {
        let request = OrderRequest::limit("ethusdt", OrderSide::Sell, dec!(0.010), dec!(2500.00));
        let params = BinanceFuturesGateway::order_params(&request);

        assert!(params.contains(&("symbol".to_string(), "ETHUSDT".to_string())));
        assert!(params.contains(&("timeInForce".to_string(), "GTC".to_string())));
        // Trailing zeros stripped from wire values.
        assert!(params.contains(&("quantity".to_string(), "0.01".to_string())));
        assert!(params.contains(&("price".to_string(), "2500".to_string())));
    }

    #[test]
    fn gateway_environment() {
        let gateway = BinanceFuturesGateway::new(&test_config()).unwrap();
        assert!(!gateway.is_production());
    }
}
