//! Binance 거래소 커넥터.
//!
//! Binance Spot REST API(`/api/v3`)와 출금/입금 API(`/wapi/v3`) 구현.
//! 계좌 관련 호출은 모두 서명 요청입니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cryptex_core::{
    parse_decimal, parse_decimal_opt, AccountInfo, AggregateTrade, ApiMethod, AssetBalance,
    CanceledOrder, Candlestick, Credentials, CurrencyInfo, Deposit, DepositStatus, ExchangeName,
    Interval, NewOrder, NewOrderParams, Order, OrderBook, OrderBookOffer, OrderBookTicker,
    OrderSide, OrderStatus, OrderType, PriceChangeInfo, Symbol, TickerInfo, TickerPrice,
    TimeInForce, Trade, Withdraw, WithdrawReceipt, WithdrawStatus,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::rest::RestClient;
use crate::traits::{require_non_empty, require_symbol, ExchangeClient, ExchangeResult};
use crate::ExchangeError;

/// Binance REST API 기본 URL.
pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// 호가창 기본 깊이.
pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 20;

const SUPPORTED_ORDER_TYPES: [OrderType; 6] = [
    OrderType::Limit,
    OrderType::Market,
    OrderType::StopLoss,
    OrderType::StopLossLimit,
    OrderType::TakeProfit,
    OrderType::TakeProfitLimit,
];

mod endpoints {
    pub const EXCHANGE_INFO: &str = "/api/v3/exchangeInfo";
    pub const ORDER_BOOK: &str = "/api/v3/depth";
    pub const AGGREGATE_TRADES: &str = "/api/v3/aggTrades";
    pub const CANDLESTICKS: &str = "/api/v3/klines";
    pub const TICKER_24H: &str = "/api/v3/ticker/24hr";
    pub const TICKER_PRICE: &str = "/api/v3/ticker/price";
    pub const BOOK_TICKER: &str = "/api/v3/ticker/bookTicker";
    pub const ORDER: &str = "/api/v3/order";
    pub const ORDER_TEST: &str = "/api/v3/order/test";
    pub const OPEN_ORDERS: &str = "/api/v3/openOrders";
    pub const ALL_ORDERS: &str = "/api/v3/allOrders";
    pub const ACCOUNT: &str = "/api/v3/account";
    pub const MY_TRADES: &str = "/api/v3/myTrades";
    pub const WITHDRAW: &str = "/wapi/v3/withdraw.html";
    pub const DEPOSIT_HISTORY: &str = "/wapi/v3/depositHistory.html";
    pub const WITHDRAW_HISTORY: &str = "/wapi/v3/withdrawHistory.html";
}

// ============================================================================
// API 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct BinanceExchangeInfo {
    symbols: Vec<BinanceSymbolInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceSymbolInfo {
    symbol: String,
    status: String,
    base_asset: String,
    quote_asset: String,
    #[serde(default)]
    filters: Vec<BinanceSymbolFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceSymbolFilter {
    filter_type: String,
    #[serde(default)]
    min_notional: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BinanceTicker24h {
    symbol: String,
    price_change: String,
    price_change_percent: String,
    weighted_avg_price: String,
    prev_close_price: String,
    last_price: String,
    bid_price: String,
    ask_price: String,
    open_price: String,
    high_price: String,
    low_price: String,
    volume: String,
    open_time: Option<i64>,
    close_time: Option<i64>,
    first_id: i64,
    last_id: i64,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct BinanceTickerPrice {
    symbol: String,
    price: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceBookTicker {
    symbol: String,
    bid_price: String,
    bid_qty: String,
    ask_price: String,
    ask_qty: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceOrderBook {
    bids: Vec<[String; 2]>,
    asks: Vec<[String; 2]>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)] // 9~11번 필드는 매핑하지 않음
struct BinanceKline(
    i64,    // 0: Open time
    String, // 1: Open
    String, // 2: High
    String, // 3: Low
    String, // 4: Close
    String, // 5: Volume
    i64,    // 6: Close time
    String, // 7: Quote asset volume
    u64,    // 8: Number of trades
    String, // 9: Taker buy base asset volume
    String, // 10: Taker buy quote asset volume
    String, // 11: Ignore
);

#[derive(Debug, Deserialize)]
struct BinanceAggTrade {
    #[serde(rename = "a")]
    id: i64,
    #[serde(rename = "p")]
    price: String,
    #[serde(rename = "q")]
    quantity: String,
    #[serde(rename = "f")]
    first_trade_id: i64,
    #[serde(rename = "l")]
    last_trade_id: i64,
    #[serde(rename = "T")]
    timestamp: i64,
    #[serde(rename = "m")]
    buyer_is_maker: bool,
    #[serde(rename = "M", default)]
    best_price_match: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceAccountBalance {
    asset: String,
    free: String,
    locked: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceAccountInfo {
    #[serde(default)]
    maker_commission: i64,
    #[serde(default)]
    taker_commission: i64,
    #[serde(default)]
    buyer_commission: i64,
    #[serde(default)]
    seller_commission: i64,
    can_trade: bool,
    can_withdraw: bool,
    can_deposit: bool,
    balances: Vec<BinanceAccountBalance>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BinanceOrder {
    symbol: String,
    order_id: i64,
    client_order_id: Option<String>,
    price: String,
    orig_qty: String,
    executed_qty: String,
    status: String,
    time_in_force: String,
    #[serde(rename = "type")]
    order_type: String,
    side: String,
    stop_price: String,
    iceberg_qty: String,
    time: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceNewOrderResponse {
    symbol: String,
    order_id: i64,
    #[serde(default)]
    client_order_id: Option<String>,
    #[serde(default)]
    transact_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceCancelResponse {
    symbol: String,
    order_id: i64,
    #[serde(default)]
    client_order_id: Option<String>,
    #[serde(default)]
    orig_client_order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTrade {
    id: i64,
    #[serde(default)]
    order_id: Option<i64>,
    price: String,
    qty: String,
    commission: String,
    commission_asset: String,
    time: i64,
    is_buyer: bool,
    is_maker: bool,
    #[serde(default)]
    is_best_match: bool,
}

/// `/wapi` 응답은 실패 시에도 HTTP 200과 `success: false`를 반환합니다.
#[derive(Debug, Deserialize)]
struct WapiResponse<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(flatten)]
    data: T,
}

#[derive(Debug, Deserialize)]
struct WapiWithdraw {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WapiDepositList {
    #[serde(default)]
    deposit_list: Vec<WapiDeposit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WapiDeposit {
    asset: String,
    amount: Decimal,
    status: i64,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    tx_id: Option<String>,
    #[serde(default)]
    insert_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WapiWithdrawList {
    #[serde(default)]
    withdraw_list: Vec<WapiWithdrawEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WapiWithdrawEntry {
    #[serde(default)]
    id: Option<String>,
    asset: String,
    amount: Decimal,
    address: String,
    #[serde(default)]
    tx_id: Option<String>,
    status: i64,
    #[serde(default)]
    apply_time: Option<i64>,
}

// ============================================================================
// Binance 클라이언트
// ============================================================================

/// Binance 거래소 클라이언트.
#[derive(Debug, Clone)]
pub struct BinanceClient {
    rest: RestClient,
    /// 서명 요청 수신 윈도우 (밀리초). 없으면 거래소 기본값.
    recv_window: Option<u64>,
}

impl BinanceClient {
    /// 새 Binance 클라이언트 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(credentials: Credentials) -> ExchangeResult<Self> {
        Self::with_timeout(credentials, None)
    }

    /// 요청 타임아웃을 지정해 생성.
    pub fn with_timeout(credentials: Credentials, timeout: Option<Duration>) -> ExchangeResult<Self> {
        Ok(Self {
            rest: RestClient::new(credentials, timeout)?,
            recv_window: None,
        })
    }

    /// 공개 API 전용 클라이언트.
    pub fn public() -> ExchangeResult<Self> {
        Self::new(Credentials::anonymous(BINANCE_API_URL))
    }

    /// 환경 변수(`BINANCE_API_KEY`, `BINANCE_API_SECRET`, `BINANCE_BASE_URL`)에서 생성.
    pub fn from_env() -> ExchangeResult<Self> {
        Self::new(Credentials::from_env("BINANCE", BINANCE_API_URL))
    }

    /// 수신 윈도우 설정.
    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    /// 통화쌍을 Binance 표기로 변환 (`ETH/BTC` -> `ETHBTC`).
    pub fn pair(symbol: &Symbol) -> ExchangeResult<String> {
        require_symbol(symbol)?;
        Ok(symbol.concatenated())
    }

    /// 주문 ID 검사. 비어 있거나 정수가 아니면 거부합니다.
    fn parse_order_id(order_id: &str) -> ExchangeResult<i64> {
        require_non_empty("order_id", order_id)?;
        order_id.trim().parse::<i64>().map_err(|_| {
            ExchangeError::invalid_argument(
                "order_id",
                format!("order id must be an integer, got {:?}", order_id),
            )
        })
    }

    /// 서명 요청 쿼리에 `recvWindow`를 붙입니다.
    fn signed_params(&self, params: &[(&str, String)]) -> String {
        let mut all_params = params.to_vec();
        if let Some(recv_window) = self.recv_window {
            all_params.push(("recvWindow", recv_window.to_string()));
        }
        build_query(&all_params)
    }

    async fn public_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let query = build_query(params);
        self.rest
            .call(ApiMethod::Get, endpoint, false, Some(&query))
            .await
    }

    async fn signed<T: DeserializeOwned>(
        &self,
        method: ApiMethod,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let query = self.signed_params(params);
        self.rest.call(method, endpoint, true, Some(&query)).await
    }

    async fn signed_order<T: DeserializeOwned>(
        &self,
        method: ApiMethod,
        endpoint: &str,
        params: &NewOrderParams,
    ) -> ExchangeResult<T> {
        let mut query = params.to_query();
        if let Some(recv_window) = self.recv_window {
            query.push_str(&format!("&recvWindow={}", recv_window));
        }
        self.rest.call(method, endpoint, true, Some(&query)).await
    }

    /// `/wapi` 호출. `success: false`는 `ApiError{0, msg}`로 변환합니다.
    async fn wapi<T: DeserializeOwned>(
        &self,
        method: ApiMethod,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<(T, Option<String>)> {
        let response: WapiResponse<T> = self.signed(method, endpoint, params).await?;
        if !response.success {
            return Err(ExchangeError::ApiError {
                code: 0,
                message: response.msg.unwrap_or_default(),
            });
        }
        Ok((response.data, response.msg))
    }

    async fn ticker_24h(&self, symbol: &Symbol) -> ExchangeResult<BinanceTicker24h> {
        let pair = Self::pair(symbol)?;
        self.public_get(endpoints::TICKER_24H, &[("symbol", pair)])
            .await
    }
}

/// 파라미터에서 쿼리 문자열 생성. 값은 퍼센트 인코딩되며 서명도 인코딩된 문자열 기준입니다.
fn build_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

fn asset_param(asset: Option<&str>) -> Vec<(&'static str, String)> {
    asset
        .filter(|a| !a.trim().is_empty())
        .map(|a| vec![("asset", a.trim().to_uppercase())])
        .unwrap_or_default()
}

fn min_trade_price(filters: &[BinanceSymbolFilter]) -> Option<Decimal> {
    filters
        .iter()
        .find(|f| f.filter_type == "MIN_NOTIONAL" || f.filter_type == "NOTIONAL")
        .and_then(|f| parse_decimal_opt(f.min_notional.as_deref()))
}

fn parse_offers(levels: &[[String; 2]]) -> Vec<OrderBookOffer> {
    levels
        .iter()
        .map(|[price, quantity]| OrderBookOffer {
            price: parse_decimal(price),
            quantity: parse_decimal(quantity),
        })
        .collect()
}

impl From<&BinanceTicker24h> for TickerInfo {
    fn from(t: &BinanceTicker24h) -> Self {
        TickerInfo {
            pair: t.symbol.clone(),
            bid_price: parse_decimal(&t.bid_price),
            ask_price: parse_decimal(&t.ask_price),
            last_price: parse_decimal(&t.last_price),
            high_price: parse_decimal(&t.high_price),
            low_price: parse_decimal(&t.low_price),
            volume: parse_decimal(&t.volume),
        }
    }
}

impl From<BinanceTicker24h> for PriceChangeInfo {
    fn from(t: BinanceTicker24h) -> Self {
        PriceChangeInfo {
            price_change: parse_decimal(&t.price_change),
            price_change_percent: parse_decimal(&t.price_change_percent),
            weighted_avg_price: parse_decimal(&t.weighted_avg_price),
            prev_close_price: parse_decimal(&t.prev_close_price),
            last_price: parse_decimal(&t.last_price),
            bid_price: parse_decimal(&t.bid_price),
            ask_price: parse_decimal(&t.ask_price),
            open_price: parse_decimal(&t.open_price),
            high_price: parse_decimal(&t.high_price),
            low_price: parse_decimal(&t.low_price),
            volume: parse_decimal(&t.volume),
            open_time: t.open_time.and_then(to_datetime),
            close_time: t.close_time.and_then(to_datetime),
            first_trade_id: t.first_id,
            last_trade_id: t.last_id,
            count: t.count,
            pair: t.symbol,
        }
    }
}

impl From<BinanceOrder> for Order {
    fn from(o: BinanceOrder) -> Self {
        Order {
            order_id: o.order_id.to_string(),
            client_order_id: o.client_order_id.filter(|id| !id.is_empty()),
            side: OrderSide::parse(&o.side),
            order_type: OrderType::parse(&o.order_type),
            time_in_force: TimeInForce::parse(&o.time_in_force),
            status: OrderStatus::parse(&o.status),
            price: parse_decimal(&o.price),
            stop_price: parse_decimal(&o.stop_price),
            original_quantity: parse_decimal(&o.orig_qty),
            executed_quantity: parse_decimal(&o.executed_qty),
            iceberg_quantity: parse_decimal(&o.iceberg_qty),
            created_at: o.time.and_then(to_datetime),
            pair: o.symbol,
        }
    }
}

fn to_candlestick(k: BinanceKline, interval: Interval) -> Candlestick {
    Candlestick {
        interval,
        open_time: to_datetime(k.0).unwrap_or_default(),
        open: parse_decimal(&k.1),
        high: parse_decimal(&k.2),
        low: parse_decimal(&k.3),
        close: parse_decimal(&k.4),
        volume: parse_decimal(&k.5),
        close_time: to_datetime(k.6).unwrap_or_default(),
        quote_volume: parse_decimal(&k.7),
        trade_count: k.8,
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    fn key(&self) -> ExchangeName {
        ExchangeName::Binance
    }

    fn url(&self) -> &str {
        self.rest.base_url()
    }

    fn api_version(&self) -> &str {
        "v3"
    }

    fn supported_order_types(&self) -> &[OrderType] {
        &SUPPORTED_ORDER_TYPES
    }

    fn has_credentials(&self) -> bool {
        self.rest.has_credentials()
    }

    // === 시장 데이터 ===

    async fn get_exchange_currencies_info(&self) -> ExchangeResult<Vec<CurrencyInfo>> {
        let info: BinanceExchangeInfo = self.public_get(endpoints::EXCHANGE_INFO, &[]).await?;

        debug!(count = info.symbols.len(), "Binance exchange info loaded");

        Ok(info
            .symbols
            .into_iter()
            .map(|s| CurrencyInfo {
                symbol: Symbol::crypto(&s.base_asset, &s.quote_asset),
                min_trade_price: min_trade_price(&s.filters),
                is_active: s.status == "TRADING",
                pair: s.symbol,
            })
            .collect())
    }

    async fn get_all_tickers_info(&self) -> ExchangeResult<Vec<TickerInfo>> {
        let tickers: Vec<BinanceTicker24h> = self.public_get(endpoints::TICKER_24H, &[]).await?;
        Ok(tickers.iter().map(TickerInfo::from).collect())
    }

    async fn get_ticker_info(&self, symbol: &Symbol) -> ExchangeResult<TickerInfo> {
        let ticker = self.ticker_24h(symbol).await?;
        Ok(TickerInfo::from(&ticker))
    }

    async fn get_all_tickers_price(&self) -> ExchangeResult<Vec<TickerPrice>> {
        let prices: Vec<BinanceTickerPrice> =
            self.public_get(endpoints::TICKER_PRICE, &[]).await?;

        Ok(prices
            .into_iter()
            .map(|p| TickerPrice {
                price: parse_decimal(&p.price),
                pair: p.symbol,
            })
            .collect())
    }

    async fn get_ticker_price(&self, symbol: &Symbol) -> ExchangeResult<TickerPrice> {
        let pair = Self::pair(symbol)?;
        let price: BinanceTickerPrice = self
            .public_get(endpoints::TICKER_PRICE, &[("symbol", pair)])
            .await?;

        Ok(TickerPrice {
            price: parse_decimal(&price.price),
            pair: price.symbol,
        })
    }

    async fn get_order_book(&self, symbol: &Symbol, limit: Option<u32>) -> ExchangeResult<OrderBook> {
        let pair = Self::pair(symbol)?;
        let limit = limit.unwrap_or(DEFAULT_ORDER_BOOK_LIMIT);

        let book: BinanceOrderBook = self
            .public_get(
                endpoints::ORDER_BOOK,
                &[("symbol", pair), ("limit", limit.to_string())],
            )
            .await?;

        Ok(OrderBook {
            bids: parse_offers(&book.bids),
            asks: parse_offers(&book.asks),
        })
    }

    async fn get_order_book_tickers(&self) -> ExchangeResult<Vec<OrderBookTicker>> {
        let tickers: Vec<BinanceBookTicker> = self.public_get(endpoints::BOOK_TICKER, &[]).await?;

        Ok(tickers
            .into_iter()
            .map(|t| OrderBookTicker {
                bid_price: parse_decimal(&t.bid_price),
                bid_quantity: parse_decimal(&t.bid_qty),
                ask_price: parse_decimal(&t.ask_price),
                ask_quantity: parse_decimal(&t.ask_qty),
                pair: t.symbol,
            })
            .collect())
    }

    async fn get_price_change_24h(&self, symbol: &Symbol) -> ExchangeResult<PriceChangeInfo> {
        Ok(self.ticker_24h(symbol).await?.into())
    }

    async fn get_candlesticks(
        &self,
        symbol: &Symbol,
        interval: Interval,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<Candlestick>> {
        let pair = Self::pair(symbol)?;
        let mut params = vec![("symbol", pair), ("interval", interval.as_str().to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let klines: Vec<BinanceKline> = self.public_get(endpoints::CANDLESTICKS, &params).await?;

        Ok(klines
            .into_iter()
            .map(|k| to_candlestick(k, interval))
            .collect())
    }

    async fn get_aggregate_trades(
        &self,
        symbol: &Symbol,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<AggregateTrade>> {
        let pair = Self::pair(symbol)?;
        let mut params = vec![("symbol", pair)];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let trades: Vec<BinanceAggTrade> =
            self.public_get(endpoints::AGGREGATE_TRADES, &params).await?;

        Ok(trades
            .into_iter()
            .map(|t| AggregateTrade {
                aggregate_trade_id: t.id,
                price: parse_decimal(&t.price),
                quantity: parse_decimal(&t.quantity),
                first_trade_id: t.first_trade_id,
                last_trade_id: t.last_trade_id,
                timestamp: to_datetime(t.timestamp).unwrap_or_default(),
                buyer_is_maker: t.buyer_is_maker,
                best_price_match: t.best_price_match,
            })
            .collect())
    }

    // === 계좌 ===

    async fn get_account_info(&self) -> ExchangeResult<AccountInfo> {
        let account: BinanceAccountInfo = self
            .signed(ApiMethod::Get, endpoints::ACCOUNT, &[])
            .await?;

        Ok(AccountInfo {
            maker_commission: account.maker_commission,
            taker_commission: account.taker_commission,
            buyer_commission: account.buyer_commission,
            seller_commission: account.seller_commission,
            can_trade: account.can_trade,
            can_withdraw: account.can_withdraw,
            can_deposit: account.can_deposit,
            balances: account
                .balances
                .into_iter()
                .map(|b| AssetBalance {
                    free: parse_decimal(&b.free),
                    locked: parse_decimal(&b.locked),
                    asset: b.asset,
                })
                .collect(),
        })
    }

    async fn get_account_balance(&self, asset: &str) -> ExchangeResult<AssetBalance> {
        require_non_empty("asset", asset)?;
        let account = self.get_account_info().await?;

        Ok(account.balance(asset).cloned().unwrap_or(AssetBalance {
            asset: asset.trim().to_uppercase(),
            free: Decimal::ZERO,
            locked: Decimal::ZERO,
        }))
    }

    async fn post_new_order(&self, params: &NewOrderParams) -> ExchangeResult<NewOrder> {
        self.validate_new_order(params)?;

        let response: BinanceNewOrderResponse = self
            .signed_order(ApiMethod::Post, endpoints::ORDER, params)
            .await?;

        info!(
            pair = %response.symbol,
            order_id = response.order_id,
            side = %params.side,
            order_type = %params.order_type,
            "Binance order placed"
        );

        Ok(NewOrder {
            pair: response.symbol,
            order_id: response.order_id.to_string(),
            client_order_id: response.client_order_id,
            transact_time: response.transact_time.and_then(to_datetime),
        })
    }

    async fn test_new_order(&self, params: &NewOrderParams) -> ExchangeResult<()> {
        self.validate_new_order(params)?;

        let _: serde_json::Value = self
            .signed_order(ApiMethod::Post, endpoints::ORDER_TEST, params)
            .await?;
        Ok(())
    }

    async fn get_order(&self, symbol: &Symbol, order_id: &str) -> ExchangeResult<Order> {
        let pair = Self::pair(symbol)?;
        let order_id = Self::parse_order_id(order_id)?;

        let order: BinanceOrder = self
            .signed(
                ApiMethod::Get,
                endpoints::ORDER,
                &[("symbol", pair), ("orderId", order_id.to_string())],
            )
            .await?;
        Ok(order.into())
    }

    async fn cancel_order(&self, symbol: &Symbol, order_id: &str) -> ExchangeResult<CanceledOrder> {
        let pair = Self::pair(symbol)?;
        let order_id = Self::parse_order_id(order_id)?;

        let response: BinanceCancelResponse = self
            .signed(
                ApiMethod::Delete,
                endpoints::ORDER,
                &[("symbol", pair), ("orderId", order_id.to_string())],
            )
            .await?;

        info!(pair = %response.symbol, order_id = response.order_id, "Binance order canceled");

        Ok(CanceledOrder {
            pair: response.symbol,
            order_id: response.order_id.to_string(),
            client_order_id: response.client_order_id,
            orig_client_order_id: response.orig_client_order_id,
        })
    }

    async fn get_current_open_orders(&self, symbol: Option<&Symbol>) -> ExchangeResult<Vec<Order>> {
        let params = match symbol {
            Some(symbol) => vec![("symbol", Self::pair(symbol)?)],
            None => Vec::new(),
        };

        let orders: Vec<BinanceOrder> = self
            .signed(ApiMethod::Get, endpoints::OPEN_ORDERS, &params)
            .await?;
        Ok(orders.into_iter().map(Order::from).collect())
    }

    async fn get_all_orders(&self, symbol: &Symbol, limit: Option<u32>) -> ExchangeResult<Vec<Order>> {
        let mut params = vec![("symbol", Self::pair(symbol)?)];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let orders: Vec<BinanceOrder> = self
            .signed(ApiMethod::Get, endpoints::ALL_ORDERS, &params)
            .await?;
        Ok(orders.into_iter().map(Order::from).collect())
    }

    async fn get_trade_list(&self, symbol: &Symbol) -> ExchangeResult<Vec<Trade>> {
        let pair = Self::pair(symbol)?;
        let trades: Vec<BinanceTrade> = self
            .signed(ApiMethod::Get, endpoints::MY_TRADES, &[("symbol", pair)])
            .await?;

        Ok(trades
            .into_iter()
            .map(|t| Trade {
                id: t.id,
                order_id: t.order_id.map(|id| id.to_string()),
                price: parse_decimal(&t.price),
                quantity: parse_decimal(&t.qty),
                commission: parse_decimal(&t.commission),
                commission_asset: t.commission_asset,
                time: to_datetime(t.time),
                is_buyer: t.is_buyer,
                is_maker: t.is_maker,
                is_best_match: t.is_best_match,
            })
            .collect())
    }

    async fn withdraw(
        &self,
        asset: &str,
        address: &str,
        amount: Decimal,
    ) -> ExchangeResult<WithdrawReceipt> {
        require_non_empty("asset", asset)?;
        require_non_empty("address", address)?;
        if amount <= Decimal::ZERO {
            return Err(ExchangeError::invalid_argument(
                "amount",
                format!("amount must be positive, got {}", amount),
            ));
        }

        let (receipt, msg): (WapiWithdraw, _) = self
            .wapi(
                ApiMethod::Post,
                endpoints::WITHDRAW,
                &[
                    ("asset", asset.trim().to_uppercase()),
                    ("address", address.trim().to_string()),
                    ("amount", amount.normalize().to_string()),
                ],
            )
            .await?;

        info!(asset, amount = %amount, "Binance withdrawal requested");

        Ok(WithdrawReceipt {
            id: receipt.id,
            success: true,
            message: msg.unwrap_or_default(),
        })
    }

    async fn get_deposit_history(&self, asset: Option<&str>) -> ExchangeResult<Vec<Deposit>> {
        let (history, _): (WapiDepositList, _) = self
            .wapi(ApiMethod::Get, endpoints::DEPOSIT_HISTORY, &asset_param(asset))
            .await?;

        Ok(history
            .deposit_list
            .into_iter()
            .map(|d| Deposit {
                asset: d.asset,
                amount: d.amount,
                status: DepositStatus::from_code(d.status),
                address: d.address,
                tx_id: d.tx_id,
                date: d.insert_time.and_then(to_datetime),
            })
            .collect())
    }

    async fn get_withdraw_history(&self, asset: Option<&str>) -> ExchangeResult<Vec<Withdraw>> {
        let (history, _): (WapiWithdrawList, _) = self
            .wapi(ApiMethod::Get, endpoints::WITHDRAW_HISTORY, &asset_param(asset))
            .await?;

        Ok(history
            .withdraw_list
            .into_iter()
            .map(|w| Withdraw {
                id: w.id,
                asset: w.asset,
                amount: w.amount,
                address: w.address,
                tx_id: w.tx_id,
                status: WithdrawStatus::from_code(w.status),
                date: w.apply_time.and_then(to_datetime),
            })
            .collect())
    }
}
