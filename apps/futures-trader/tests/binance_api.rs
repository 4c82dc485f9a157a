//! HTTP-level tests for the Binance gateway against a mock server.

use rust_decimal_macros::dec;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use futures_trader::gateway::binance::{BinanceConfig, BinanceEnvironment, BinanceFuturesGateway};
use futures_trader::gateway::{ExchangeGateway, GatewayError};
use futures_trader::orders::{OrderRequest, OrderSide};

/// Matches requests whose query string carries the named parameter,
/// whatever its value.
struct HasQueryParam(&'static str);

impl Match for HasQueryParam {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(key, _)| key == self.0)
    }
}

async fn gateway_against(server: &MockServer) -> BinanceFuturesGateway {
    let config = BinanceConfig::new(
        "test-key".to_string(),
        "test-secret".to_string(),
        BinanceEnvironment::Testnet,
    );
    BinanceFuturesGateway::new(&config)
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn exchange_info_is_unsigned_and_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v1/exchangeInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "symbols": [{
                    "symbol": "BTCUSDT",
                    "status": "TRADING",
                    "filters": [
                        {"filterType": "LOT_SIZE", "minQty": "0.001", "stepSize": "0.001"},
                        {"filterType": "PRICE_FILTER", "tickSize": "0.10"}
                    ]
                }]
            }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let info = gateway.get_exchange_info().await.unwrap();

    assert_eq!(info.symbols.len(), 1);
    assert_eq!(info.symbols[0].symbol, "BTCUSDT");
    assert_eq!(info.symbols[0].filters[0].min_qty, Some(dec!(0.001)));
}

#[tokio::test]
async fn signed_request_carries_auth_artifacts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v2/account"))
        .and(header("X-MBX-APIKEY", "test-key"))
        .and(query_param("recvWindow", "5000"))
        .and(HasQueryParam("timestamp"))
        .and(HasQueryParam("signature"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "totalWalletBalance": "1000.0000",
                "totalUnrealizedProfit": "0.0000",
                "totalMarginBalance": "1000.0000",
                "availableBalance": "950.0000"
            }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let account = gateway.get_account_info().await.unwrap();

    assert_eq!(account.total_wallet_balance, Some(dec!(1000)));
    assert_eq!(account.available_balance, Some(dec!(950)));
}

#[tokio::test]
async fn create_limit_order_sends_expected_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(query_param("symbol", "ETHUSDT"))
        .and(query_param("side", "SELL"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("quantity", "0.01"))
        .and(query_param("price", "2500"))
        .and(query_param("timeInForce", "GTC"))
        .and(HasQueryParam("signature"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "orderId": 555,
                "symbol": "ETHUSDT",
                "status": "NEW",
                "side": "SELL",
                "type": "LIMIT",
                "origQty": "0.010",
                "price": "2500.00"
            }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let request = OrderRequest::limit("ethusdt", OrderSide::Sell, dec!(0.010), dec!(2500.00));
    let record = gateway.create_order(&request).await.unwrap();

    assert_eq!(record.order_id, 555);
    assert_eq!(record.status, "NEW");
}

#[tokio::test]
async fn market_order_omits_price_and_time_in_force() {
    let server = MockServer::start().await;

    struct LacksQueryParam(&'static str);
    impl Match for LacksQueryParam {
        fn matches(&self, request: &Request) -> bool {
            request.url.query_pairs().all(|(key, _)| key != self.0)
        }
    }

    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(query_param("type", "MARKET"))
        .and(LacksQueryParam("price"))
        .and(LacksQueryParam("timeInForce"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"orderId": 556, "symbol": "BTCUSDT", "status": "NEW"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let request = OrderRequest::market("btcusdt", OrderSide::Buy, dec!(0.001));
    let record = gateway.create_order(&request).await.unwrap();

    assert_eq!(record.order_id, 556);
}

#[tokio::test]
async fn api_error_payload_maps_to_code_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"code": -1121, "msg": "Invalid symbol."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let request = OrderRequest::market("NOPEUSDT", OrderSide::Buy, dec!(1));
    let err = gateway.create_order(&request).await.unwrap_err();

    match err {
        GatewayError::Api { code, message } => {
            assert_eq!(code, -1121);
            assert_eq!(message, "Invalid symbol.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v2/account"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"code": -2014, "msg": "API-key format invalid."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let err = gateway.get_account_info().await.unwrap_err();

    assert!(matches!(err, GatewayError::AuthenticationFailed));
}

#[tokio::test]
async fn cancel_order_uses_delete_with_order_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/fapi/v1/order"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("orderId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"orderId": 42, "symbol": "BTCUSDT", "status": "CANCELED"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let record = gateway.cancel_order("btcusdt", 42).await.unwrap();

    assert_eq!(record.status, "CANCELED");
}

#[tokio::test]
async fn open_orders_without_filter_lists_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v1/openOrders"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[
                {"orderId": 1, "symbol": "BTCUSDT", "status": "NEW"},
                {"orderId": 2, "symbol": "ETHUSDT", "status": "NEW"}
            ]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let orders = gateway.get_open_orders(None).await.unwrap();

    assert_eq!(orders.len(), 2);
}

#[tokio::test]
async fn account_trades_pass_symbol_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fapi/v1/userTrades"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id": 9, "orderId": 42, "symbol": "BTCUSDT", "price": "27100.10", "qty": "0.002"}]"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_against(&server).await;
    let trades = gateway.get_account_trades("btcusdt", 10).await.unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].qty, Some(dec!(0.002)));
}
