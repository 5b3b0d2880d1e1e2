//! Bittrex 거래소 커넥터.
//!
//! v1.1 공개 API만 구현합니다. 계좌/주문 작업은 `NotSupported`를 반환합니다.
//! 마켓 이름은 `QUOTE-BASE` 형식입니다 (예: ETH/BTC -> `BTC-ETH`).

use async_trait::async_trait;
use cryptex_core::{
    ApiMethod, Credentials, CurrencyInfo, ExchangeName, OrderBook, OrderBookOffer, OrderType,
    Symbol, TickerInfo, TickerPrice,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::rest::RestClient;
use crate::traits::{require_symbol, ExchangeClient, ExchangeResult};
use crate::ExchangeError;

/// Bittrex REST API 기본 URL.
pub const BITTREX_API_URL: &str = "https://bittrex.com";

const SUPPORTED_ORDER_TYPES: [OrderType; 1] = [OrderType::Limit];

mod endpoints {
    pub const MARKETS: &str = "/api/v1.1/public/getmarkets";
    pub const MARKET_SUMMARIES: &str = "/api/v1.1/public/getmarketsummaries";
    pub const MARKET_SUMMARY: &str = "/api/v1.1/public/getmarketsummary";
    pub const TICKER: &str = "/api/v1.1/public/getticker";
    pub const ORDER_BOOK: &str = "/api/v1.1/public/getorderbook";
}

// ============================================================================
// API 응답 타입
// ============================================================================

/// 모든 응답을 감싸는 봉투 (`{"success", "message", "result"}`).
#[derive(Debug, Deserialize)]
struct BittrexEnvelope<T> {
    success: bool,
    #[serde(default)]
    message: String,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BittrexMarket {
    market_currency: String,
    base_currency: String,
    market_name: String,
    #[serde(default)]
    min_trade_size: Option<Decimal>,
    #[serde(default)]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BittrexMarketSummary {
    market_name: String,
    high: Option<Decimal>,
    low: Option<Decimal>,
    volume: Option<Decimal>,
    last: Option<Decimal>,
    bid: Option<Decimal>,
    ask: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BittrexTicker {
    last: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct BittrexOrderBook {
    #[serde(default)]
    buy: Option<Vec<BittrexOrderBookEntry>>,
    #[serde(default)]
    sell: Option<Vec<BittrexOrderBookEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BittrexOrderBookEntry {
    quantity: Decimal,
    rate: Decimal,
}

impl From<BittrexMarketSummary> for TickerInfo {
    fn from(s: BittrexMarketSummary) -> Self {
        TickerInfo {
            pair: s.market_name,
            bid_price: s.bid.unwrap_or_default(),
            ask_price: s.ask.unwrap_or_default(),
            last_price: s.last.unwrap_or_default(),
            high_price: s.high.unwrap_or_default(),
            low_price: s.low.unwrap_or_default(),
            volume: s.volume.unwrap_or_default(),
        }
    }
}

fn to_offers(entries: Option<Vec<BittrexOrderBookEntry>>, limit: Option<u32>) -> Vec<OrderBookOffer> {
    let offers = entries.unwrap_or_default().into_iter().map(|e| OrderBookOffer {
        price: e.rate,
        quantity: e.quantity,
    });
    match limit {
        Some(limit) => offers.take(limit as usize).collect(),
        None => offers.collect(),
    }
}

// ============================================================================
// Bittrex 클라이언트
// ============================================================================

/// Bittrex 거래소 클라이언트.
#[derive(Debug, Clone)]
pub struct BittrexClient {
    rest: RestClient,
}

impl BittrexClient {
    pub fn new(credentials: Credentials) -> ExchangeResult<Self> {
        Self::with_timeout(credentials, None)
    }

    pub fn with_timeout(credentials: Credentials, timeout: Option<Duration>) -> ExchangeResult<Self> {
        Ok(Self {
            rest: RestClient::new(credentials, timeout)?,
        })
    }

    pub fn public() -> ExchangeResult<Self> {
        Self::new(Credentials::anonymous(BITTREX_API_URL))
    }

    /// 통화쌍을 Bittrex 마켓 이름으로 변환 (`ETH/BTC` -> `BTC-ETH`).
    pub fn market_name(symbol: &Symbol) -> ExchangeResult<String> {
        require_symbol(symbol)?;
        Ok(format!("{}-{}", symbol.quote, symbol.base))
    }

    async fn public_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Option<&str>,
    ) -> ExchangeResult<T> {
        let envelope: BittrexEnvelope<T> = self
            .rest
            .call(ApiMethod::Get, endpoint, false, query)
            .await?;
        unwrap_envelope(endpoint, envelope)
    }

    async fn market_summaries(&self) -> ExchangeResult<Vec<BittrexMarketSummary>> {
        self.public_get(endpoints::MARKET_SUMMARIES, None).await
    }
}

fn market_query(market: &str) -> String {
    format!("market={}", urlencoding::encode(market))
}

fn unwrap_envelope<T>(endpoint: &str, envelope: BittrexEnvelope<T>) -> ExchangeResult<T> {
    if !envelope.success {
        return Err(ExchangeError::ApiError {
            code: 0,
            message: envelope.message,
        });
    }
    envelope
        .result
        .ok_or_else(|| ExchangeError::ParseError(format!("{} returned no result", endpoint)))
}

#[async_trait]
impl ExchangeClient for BittrexClient {
    fn key(&self) -> ExchangeName {
        ExchangeName::Bittrex
    }

    fn url(&self) -> &str {
        self.rest.base_url()
    }

    fn api_version(&self) -> &str {
        "v1.1"
    }

    fn supported_order_types(&self) -> &[OrderType] {
        &SUPPORTED_ORDER_TYPES
    }

    fn has_credentials(&self) -> bool {
        self.rest.has_credentials()
    }

    async fn get_exchange_currencies_info(&self) -> ExchangeResult<Vec<CurrencyInfo>> {
        let markets: Vec<BittrexMarket> = self.public_get(endpoints::MARKETS, None).await?;

        Ok(markets
            .into_iter()
            .map(|m| CurrencyInfo {
                symbol: Symbol::crypto(&m.market_currency, &m.base_currency),
                min_trade_price: m.min_trade_size,
                is_active: m.is_active,
                pair: m.market_name,
            })
            .collect())
    }

    async fn get_all_tickers_info(&self) -> ExchangeResult<Vec<TickerInfo>> {
        let summaries = self.market_summaries().await?;
        Ok(summaries.into_iter().map(TickerInfo::from).collect())
    }

    async fn get_ticker_info(&self, symbol: &Symbol) -> ExchangeResult<TickerInfo> {
        let market = Self::market_name(symbol)?;
        let summaries: Vec<BittrexMarketSummary> = self
            .public_get(
                endpoints::MARKET_SUMMARY,
                Some(&market_query(&market)),
            )
            .await?;

        summaries
            .into_iter()
            .next()
            .map(TickerInfo::from)
            .ok_or_else(|| ExchangeError::ParseError(format!("no market summary for {}", market)))
    }

    async fn get_all_tickers_price(&self) -> ExchangeResult<Vec<TickerPrice>> {
        let summaries = self.market_summaries().await?;

        Ok(summaries
            .into_iter()
            .map(|s| TickerPrice {
                price: s.last.unwrap_or_default(),
                pair: s.market_name,
            })
            .collect())
    }

    async fn get_ticker_price(&self, symbol: &Symbol) -> ExchangeResult<TickerPrice> {
        let market = Self::market_name(symbol)?;
        let ticker: BittrexTicker = self
            .public_get(endpoints::TICKER, Some(&market_query(&market)))
            .await?;

        Ok(TickerPrice {
            pair: market,
            price: ticker.last.unwrap_or_default(),
        })
    }

    async fn get_order_book(&self, symbol: &Symbol, limit: Option<u32>) -> ExchangeResult<OrderBook> {
        let market = Self::market_name(symbol)?;
        let book: BittrexOrderBook = self
            .public_get(
                endpoints::ORDER_BOOK,
                Some(&format!("{}&type=both", market_query(&market))),
            )
            .await?;

        Ok(OrderBook {
            bids: to_offers(book.buy, limit),
            asks: to_offers(book.sell, limit),
        })
    }
}
