//! Binance 커넥터 통합 테스트 (mockito HTTP 서버 사용).

use cryptex_core::{Credentials, Interval, NewOrderParams, OrderSide, OrderStatus, Symbol};
use cryptex_exchange::{BinanceClient, ExchangeClient, ExchangeError};
use mockito::{Matcher, Server, ServerGuard};
use rust_decimal_macros::dec;

const SIGNATURE: &str = r"timestamp=\d{13}&signature=[0-9a-f]{64}$";

fn eth_btc() -> Symbol {
    Symbol::crypto("ETH", "BTC")
}

fn public_client(server: &ServerGuard) -> BinanceClient {
    BinanceClient::new(Credentials::anonymous(server.url())).unwrap()
}

fn signed_client(server: &ServerGuard) -> BinanceClient {
    BinanceClient::new(Credentials::new("key", "secret", server.url()))
        .unwrap()
        .with_recv_window(5000)
}

#[tokio::test]
async fn test_unsigned_query_is_sent_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::Exact("symbol=ETHBTC".to_string()))
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"symbol":"ETHBTC","price":"0.05123000"}"#)
        .create_async()
        .await;

    let price = public_client(&server)
        .get_ticker_price(&eth_btc())
        .await
        .unwrap();

    assert_eq!(price.pair, "ETHBTC");
    assert_eq!(price.price, dec!(0.05123));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_order_book_default_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/depth")
        .match_query(Matcher::Exact("symbol=ETHBTC&limit=20".to_string()))
        .with_status(200)
        .with_body(
            r#"{"lastUpdateId":1027024,
                "bids":[["4.00000000","431.00000000"],["3.90000000","10.00000000"]],
                "asks":[["4.00000200","12.00000000"]]}"#,
        )
        .create_async()
        .await;

    let book = public_client(&server)
        .get_order_book(&eth_btc(), None)
        .await
        .unwrap();

    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.best_bid().unwrap().quantity, dec!(431));
    assert_eq!(book.best_ask().unwrap().price, dec!(4.000002));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_symbol_rejected_before_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = public_client(&server);
    let err = client
        .get_order_book(&Symbol::crypto("", "BTC"), Some(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidArgument { ref argument, .. } if argument == "symbol"));

    let err = client
        .get_ticker_info(&Symbol::crypto("ETH", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidArgument { .. }));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_gateway_timeout_maps_to_request_timeout() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::Any)
        .with_status(504)
        .with_body(r#"{"code":-1007,"msg":"Timeout waiting for response from backend server."}"#)
        .create_async()
        .await;

    let err = public_client(&server)
        .get_ticker_price(&eth_btc())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.api_code(), None);
}

#[tokio::test]
async fn test_api_error_body_is_parsed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"code":-1100,"msg":"bad"}"#)
        .create_async()
        .await;

    let err = public_client(&server)
        .get_ticker_price(&eth_btc())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::ApiError { code: -1100, ref message } if message == "bad"
    ));
}

#[tokio::test]
async fn test_non_json_error_body_degrades() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = public_client(&server)
        .get_ticker_price(&eth_btc())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::ApiError { code: 0, ref message } if message.is_empty()
    ));
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = public_client(&server)
        .get_ticker_price(&eth_btc())
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::ParseError(_)));
}

#[tokio::test]
async fn test_signed_account_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/account")
        .match_query(Matcher::Regex(format!("^recvWindow=5000&{}", SIGNATURE)))
        .match_header("X-MBX-APIKEY", "key")
        .with_status(200)
        .with_body(
            r#"{"makerCommission":15,"takerCommission":15,"buyerCommission":0,
                "sellerCommission":0,"canTrade":true,"canWithdraw":true,"canDeposit":true,
                "balances":[{"asset":"BTC","free":"4723846.89208129","locked":"0.00000000"},
                            {"asset":"LTC","free":"4763368.68006011","locked":"1.5"}]}"#,
        )
        .expect(2)
        .create_async()
        .await;

    let client = signed_client(&server);
    let account = client.get_account_info().await.unwrap();
    assert_eq!(account.maker_commission, 15);
    assert_eq!(account.balances.len(), 2);

    let ltc = client.get_account_balance("ltc").await.unwrap();
    assert_eq!(ltc.locked, dec!(1.5));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_signed_request_without_credentials() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = public_client(&server).get_account_info().await.unwrap_err();
    assert!(matches!(err, ExchangeError::Unauthorized(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_new_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v3/order")
        .match_query(Matcher::Regex(format!(
            "^symbol=ETHBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&{}",
            SIGNATURE
        )))
        .match_header("X-MBX-APIKEY", "key")
        .with_status(200)
        .with_body(
            r#"{"symbol":"ETHBTC","orderId":28,"clientOrderId":"6gCrw2kRUAF9CvJDGP16IP",
                "transactTime":1507725176595}"#,
        )
        .create_async()
        .await;

    let params = NewOrderParams::limit(eth_btc(), OrderSide::Buy, dec!(1), dec!(0.1));
    let order = signed_client(&server).post_new_order(&params).await.unwrap();

    assert_eq!(order.order_id, "28");
    assert_eq!(
        order.transact_time.unwrap().timestamp_millis(),
        1507725176595
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_new_order_not_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let params = NewOrderParams::market(eth_btc(), OrderSide::Sell, dec!(0));
    let err = signed_client(&server)
        .test_new_order(&params)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InvalidArgument { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_order() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/order")
        .match_query(Matcher::Regex(format!(
            "^symbol=ETHBTC&orderId=1&recvWindow=5000&{}",
            SIGNATURE
        )))
        .with_status(200)
        .with_body(
            r#"{"symbol":"ETHBTC","orderId":1,"clientOrderId":"myOrder1","price":"0.1",
                "origQty":"1.0","executedQty":"0.4","status":"PARTIALLY_FILLED",
                "timeInForce":"GTC","type":"LIMIT","side":"BUY","stopPrice":"0.0",
                "icebergQty":"0.0","time":1499827319559}"#,
        )
        .create_async()
        .await;

    let order = signed_client(&server)
        .get_order(&eth_btc(), "1")
        .await
        .unwrap();

    assert_eq!(order.status, Some(OrderStatus::PartiallyFilled));
    assert_eq!(order.remaining_quantity(), dec!(0.6));
}

#[tokio::test]
async fn test_cancel_order_uses_delete() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/v3/order")
        .match_query(Matcher::Regex(format!(
            "^symbol=ETHBTC&orderId=42&recvWindow=5000&{}",
            SIGNATURE
        )))
        .with_status(200)
        .with_body(
            r#"{"symbol":"ETHBTC","origClientOrderId":"myOrder1","orderId":42,
                "clientOrderId":"cancelMyOrder1"}"#,
        )
        .create_async()
        .await;

    let canceled = signed_client(&server)
        .cancel_order(&eth_btc(), "42")
        .await
        .unwrap();

    assert_eq!(canceled.order_id, "42");
    assert_eq!(canceled.orig_client_order_id.as_deref(), Some("myOrder1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_numeric_order_id_rejected() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = signed_client(&server);
    for id in ["", "abc"] {
        let err = client.cancel_order(&eth_btc(), id).await.unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidArgument { ref argument, .. } if argument == "order_id"));
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_candlesticks() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/klines")
        .match_query(Matcher::Exact("symbol=ETHBTC&interval=1h&limit=1".to_string()))
        .with_status(200)
        .with_body(
            r#"[[1499040000000,"0.01634790","0.80000000","0.01575800","0.01577100",
                 "148976.11427815",1499644799999,"2434.19055334",308,
                 "1756.87402397","28.46694368","17928899.62484339"]]"#,
        )
        .create_async()
        .await;

    let candles = public_client(&server)
        .get_candlesticks(&eth_btc(), Interval::OneHour, Some(1))
        .await
        .unwrap();

    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].interval, Interval::OneHour);
    assert_eq!(candles[0].high, dec!(0.8));
}

#[tokio::test]
async fn test_exchange_info_currencies() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v3/exchangeInfo")
        .with_status(200)
        .with_body(
            r#"{"timezone":"UTC","serverTime":1565246363776,"symbols":[
                {"symbol":"ETHBTC","status":"TRADING","baseAsset":"ETH","quoteAsset":"BTC",
                 "filters":[{"filterType":"MIN_NOTIONAL","minNotional":"0.00100000"}]},
                {"symbol":"BNBBTC","status":"BREAK","baseAsset":"BNB","quoteAsset":"BTC",
                 "filters":[]}]}"#,
        )
        .create_async()
        .await;

    let currencies = public_client(&server)
        .get_exchange_currencies_info()
        .await
        .unwrap();

    assert_eq!(currencies.len(), 2);
    assert_eq!(currencies[0].symbol, eth_btc());
    assert_eq!(currencies[0].min_trade_price, Some(dec!(0.001)));
    assert!(!currencies[1].is_active);
    assert_eq!(currencies[1].min_trade_price, None);
}

#[tokio::test]
async fn test_deposit_history_failure_flag() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wapi/v3/depositHistory.html")
        .match_query(Matcher::Regex(format!(
            "^asset=BTC&recvWindow=5000&{}",
            SIGNATURE
        )))
        .with_status(200)
        .with_body(r#"{"success":false,"msg":"Invalid asset"}"#)
        .create_async()
        .await;

    let err = signed_client(&server)
        .get_deposit_history(Some("btc"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::ApiError { code: 0, ref message } if message == "Invalid asset"
    ));
}

#[tokio::test]
async fn test_withdraw_history() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/wapi/v3/withdrawHistory.html")
        .match_query(Matcher::Regex(format!("^recvWindow=5000&{}", SIGNATURE)))
        .with_status(200)
        .with_body(
            r#"{"withdrawList":[{"id":"7213fea8e94b4a5593d507237e5a555b","amount":1,
                "address":"0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b","asset":"ETH",
                "txId":"0xdf33b22bdb2b28b1f75ccd201a4a4m6e7g83jy5fc5d5a9d1340961598cfcb0a1",
                "applyTime":1508198532000,"status":4}],"success":true}"#,
        )
        .create_async()
        .await;

    let history = signed_client(&server)
        .get_withdraw_history(None)
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, dec!(1));
    assert_eq!(
        history[0].status,
        Some(cryptex_core::WithdrawStatus::Processing)
    );
}

#[tokio::test]
async fn test_withdraw_address_is_encoded_before_signing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/wapi/v3/withdraw.html")
        .match_query(Matcher::AllOf(vec![
            Matcher::Regex(format!(
                "^asset=BTC&address=addr%20with%23tag&amount=1&recvWindow=5000&{}",
                SIGNATURE
            )),
            Matcher::UrlEncoded("address".to_string(), "addr with#tag".to_string()),
        ]))
        .match_header("x-mbx-apikey", "key")
        .with_status(200)
        .with_body(r#"{"msg":"success","success":true,"id":"7213fea8e94b4a5593d507237e5a555b"}"#)
        .create_async()
        .await;

    let receipt = signed_client(&server)
        .withdraw("btc", "addr with#tag", dec!(1))
        .await
        .unwrap();

    assert!(receipt.success);
    assert_eq!(
        receipt.id.as_deref(),
        Some("7213fea8e94b4a5593d507237e5a555b")
    );
    mock.assert_async().await;
}
