//! 설정 기반 레지스트리 통합 테스트.

use cryptex_core::{AppConfig, ExchangeName, Symbol};
use cryptex_exchange::{CryptoClient, ExchangeError};
use mockito::{Matcher, Server};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_client_from_config() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/ticker/price")
        .match_query(Matcher::Exact("symbol=ETHBTC".to_string()))
        .match_header("X-MBX-APIKEY", "config-key")
        .with_status(200)
        .with_body(r#"{"symbol":"ETHBTC","price":"0.061"}"#)
        .create_async()
        .await;

    let toml = format!(
        r#"
[exchanges.binance]
base_url = "{}"
api_key = "config-key"
api_secret = "config-secret"
recv_window = 5000
timeout_secs = 5

[exchanges.kraken]
enabled = true

[exchanges.bittrex]
enabled = false
"#,
        server.url()
    );
    let config = AppConfig::from_toml_str(&toml).unwrap();
    let client = CryptoClient::from_config(&config).unwrap();

    assert_eq!(
        client.registry().keys(),
        vec![ExchangeName::Binance, ExchangeName::Kraken]
    );
    assert!(matches!(
        client.exchange("bittrex"),
        Err(ExchangeError::ExchangeNotFound(_))
    ));

    let binance = client.exchange("BINANCE").unwrap();
    assert!(binance.has_credentials());

    let price = binance
        .get_ticker_price(&Symbol::crypto("ETH", "BTC"))
        .await
        .unwrap();
    assert_eq!(price.price, dec!(0.061));
    mock.assert_async().await;

    let kraken = client.exchange("kraken").unwrap();
    assert!(matches!(
        kraken.get_all_tickers_price().await,
        Err(ExchangeError::NotSupported(_))
    ));
}
