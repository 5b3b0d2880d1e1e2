//! Bittrex 커넥터 통합 테스트.

use cryptex_core::{Credentials, NewOrderParams, OrderSide, Symbol};
use cryptex_exchange::{BittrexClient, ExchangeClient, ExchangeError};
use mockito::{Matcher, Server, ServerGuard};
use rust_decimal_macros::dec;

fn client(server: &ServerGuard) -> BittrexClient {
    BittrexClient::new(Credentials::anonymous(server.url())).unwrap()
}

#[tokio::test]
async fn test_get_markets() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1.1/public/getmarkets")
        .with_status(200)
        .with_body(
            r#"{"success":true,"message":"","result":[
                {"MarketCurrency":"LTC","BaseCurrency":"BTC","MarketCurrencyLong":"Litecoin",
                 "BaseCurrencyLong":"Bitcoin","MinTradeSize":0.01,"MarketName":"BTC-LTC",
                 "IsActive":true,"Created":"2014-02-13T00:00:00"}]}"#,
        )
        .create_async()
        .await;

    let markets = client(&server).get_exchange_currencies_info().await.unwrap();

    assert_eq!(markets.len(), 1);
    assert_eq!(markets[0].pair, "BTC-LTC");
    assert_eq!(markets[0].symbol, Symbol::crypto("LTC", "BTC"));
    assert_eq!(markets[0].min_trade_price, Some(dec!(0.01)));
    assert!(markets[0].is_active);
}

#[tokio::test]
async fn test_get_ticker_price_uses_quote_base_market() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/public/getticker")
        .match_query(Matcher::Exact("market=BTC-LTC".to_string()))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":{"Bid":2.05,"Ask":3.35,"Last":3.35}}"#)
        .create_async()
        .await;

    let price = client(&server)
        .get_ticker_price(&Symbol::crypto("LTC", "BTC"))
        .await
        .unwrap();

    assert_eq!(price.pair, "BTC-LTC");
    assert_eq!(price.price, dec!(3.35));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_order_book() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1.1/public/getorderbook")
        .match_query(Matcher::Exact("market=BTC-LTC&type=both".to_string()))
        .with_status(200)
        .with_body(
            r#"{"success":true,"message":"","result":{
                "buy":[{"Quantity":12.37,"Rate":0.02525},{"Quantity":5,"Rate":0.0252}],
                "sell":[{"Quantity":32.55412402,"Rate":0.02540000}]}}"#,
        )
        .create_async()
        .await;

    let book = client(&server)
        .get_order_book(&Symbol::crypto("LTC", "BTC"), Some(1))
        .await
        .unwrap();

    assert_eq!(book.bids.len(), 1);
    assert_eq!(book.best_bid().unwrap().price, dec!(0.02525));
    assert_eq!(book.best_ask().unwrap().quantity, dec!(32.55412402));
}

#[tokio::test]
async fn test_unsuccessful_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1.1/public/getmarketsummary")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false,"message":"INVALID_MARKET","result":null}"#)
        .create_async()
        .await;

    let err = client(&server)
        .get_ticker_info(&Symbol::crypto("XXX", "BTC"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExchangeError::ApiError { code: 0, ref message } if message == "INVALID_MARKET"
    ));
}

#[tokio::test]
async fn test_account_operations_not_supported() {
    let server = Server::new_async().await;
    let client = client(&server);

    assert!(matches!(
        client.get_account_info().await,
        Err(ExchangeError::NotSupported(_))
    ));

    let params = NewOrderParams::limit(Symbol::crypto("LTC", "BTC"), OrderSide::Buy, dec!(1), dec!(0.02));
    assert!(matches!(
        client.post_new_order(&params).await,
        Err(ExchangeError::NotSupported(_))
    ));
}
