//! 거래소 클라이언트 trait 정의.

use async_trait::async_trait;
use cryptex_core::{
    AccountInfo, AggregateTrade, AssetBalance, CanceledOrder, Candlestick, CurrencyInfo, Deposit,
    ExchangeName, Interval, NewOrder, NewOrderParams, Order, OrderBook, OrderBookTicker,
    OrderType, PriceChangeInfo, Symbol, TickerInfo, TickerPrice, Trade, Withdraw,
    WithdrawReceipt,
};
use rust_decimal::Decimal;

use crate::ExchangeError;

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

fn not_supported<T>(exchange: ExchangeName, operation: &str) -> ExchangeResult<T> {
    Err(ExchangeError::NotSupported(format!(
        "{} does not support {}",
        exchange, operation
    )))
}

/// 통합 거래소 인터페이스.
///
/// 메타데이터 메서드만 필수입니다. 나머지 작업은 기본 구현이
/// `ExchangeError::NotSupported`를 반환하므로 각 거래소는 지원하는 작업만 재정의합니다.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    // === 메타데이터 ===

    /// 레지스트리 키.
    fn key(&self) -> ExchangeName;

    /// 표시 이름.
    fn name(&self) -> &str {
        self.key().key()
    }

    /// REST API 기본 URL.
    fn url(&self) -> &str;

    /// 사용 중인 API 버전 (예: "v3").
    fn api_version(&self) -> &str;

    /// 지원하는 주문 유형.
    fn supported_order_types(&self) -> &[OrderType] {
        &[]
    }

    /// 서명 요청에 쓸 자격증명이 있는지.
    fn has_credentials(&self) -> bool {
        false
    }

    /// 신규 주문 파라미터 검사 (네트워크 호출 전).
    fn validate_new_order(&self, params: &NewOrderParams) -> ExchangeResult<()> {
        params.validate()?;
        if !self.supported_order_types().contains(&params.order_type) {
            return Err(ExchangeError::invalid_argument(
                "order_type",
                format!("{} is not supported by {}", params.order_type, self.name()),
            ));
        }
        Ok(())
    }

    // === 시장 데이터 ===

    /// 거래 가능한 통화쌍 목록.
    async fn get_exchange_currencies_info(&self) -> ExchangeResult<Vec<CurrencyInfo>> {
        not_supported(self.key(), "get_exchange_currencies_info")
    }

    /// 전체 통화쌍 24시간 시세.
    async fn get_all_tickers_info(&self) -> ExchangeResult<Vec<TickerInfo>> {
        not_supported(self.key(), "get_all_tickers_info")
    }

    /// 통화쌍 24시간 시세.
    async fn get_ticker_info(&self, _symbol: &Symbol) -> ExchangeResult<TickerInfo> {
        not_supported(self.key(), "get_ticker_info")
    }

    /// 전체 통화쌍 최근 체결가.
    async fn get_all_tickers_price(&self) -> ExchangeResult<Vec<TickerPrice>> {
        not_supported(self.key(), "get_all_tickers_price")
    }

    /// 통화쌍 최근 체결가.
    async fn get_ticker_price(&self, _symbol: &Symbol) -> ExchangeResult<TickerPrice> {
        not_supported(self.key(), "get_ticker_price")
    }

    /// 호가창. `limit`이 없으면 거래소 기본 깊이.
    async fn get_order_book(
        &self,
        _symbol: &Symbol,
        _limit: Option<u32>,
    ) -> ExchangeResult<OrderBook> {
        not_supported(self.key(), "get_order_book")
    }

    /// 전체 통화쌍 최우선 호가.
    async fn get_order_book_tickers(&self) -> ExchangeResult<Vec<OrderBookTicker>> {
        not_supported(self.key(), "get_order_book_tickers")
    }

    /// 24시간 가격 변동 통계.
    async fn get_price_change_24h(&self, _symbol: &Symbol) -> ExchangeResult<PriceChangeInfo> {
        not_supported(self.key(), "get_price_change_24h")
    }

    /// 캔들스틱.
    async fn get_candlesticks(
        &self,
        _symbol: &Symbol,
        _interval: Interval,
        _limit: Option<u32>,
    ) -> ExchangeResult<Vec<Candlestick>> {
        not_supported(self.key(), "get_candlesticks")
    }

    /// 집계 체결 내역.
    async fn get_aggregate_trades(
        &self,
        _symbol: &Symbol,
        _limit: Option<u32>,
    ) -> ExchangeResult<Vec<AggregateTrade>> {
        not_supported(self.key(), "get_aggregate_trades")
    }

    // === 계좌 ===

    /// 계좌 정보.
    async fn get_account_info(&self) -> ExchangeResult<AccountInfo> {
        not_supported(self.key(), "get_account_info")
    }

    /// 자산 잔고. 보유 내역이 없으면 0 잔고를 반환합니다.
    async fn get_account_balance(&self, _asset: &str) -> ExchangeResult<AssetBalance> {
        not_supported(self.key(), "get_account_balance")
    }

    /// 신규 주문.
    async fn post_new_order(&self, _params: &NewOrderParams) -> ExchangeResult<NewOrder> {
        not_supported(self.key(), "post_new_order")
    }

    /// 신규 주문 검증만 수행 (거래소에 주문이 생성되지 않음).
    async fn test_new_order(&self, _params: &NewOrderParams) -> ExchangeResult<()> {
        not_supported(self.key(), "test_new_order")
    }

    /// 주문 조회.
    async fn get_order(&self, _symbol: &Symbol, _order_id: &str) -> ExchangeResult<Order> {
        not_supported(self.key(), "get_order")
    }

    /// 주문 취소.
    async fn cancel_order(
        &self,
        _symbol: &Symbol,
        _order_id: &str,
    ) -> ExchangeResult<CanceledOrder> {
        not_supported(self.key(), "cancel_order")
    }

    /// 미체결 주문. `symbol`이 없으면 전체 통화쌍.
    async fn get_current_open_orders(
        &self,
        _symbol: Option<&Symbol>,
    ) -> ExchangeResult<Vec<Order>> {
        not_supported(self.key(), "get_current_open_orders")
    }

    /// 통화쌍의 전체 주문 내역.
    async fn get_all_orders(
        &self,
        _symbol: &Symbol,
        _limit: Option<u32>,
    ) -> ExchangeResult<Vec<Order>> {
        not_supported(self.key(), "get_all_orders")
    }

    /// 통화쌍의 체결 내역.
    async fn get_trade_list(&self, _symbol: &Symbol) -> ExchangeResult<Vec<Trade>> {
        not_supported(self.key(), "get_trade_list")
    }

    /// 출금 요청.
    async fn withdraw(
        &self,
        _asset: &str,
        _address: &str,
        _amount: Decimal,
    ) -> ExchangeResult<WithdrawReceipt> {
        not_supported(self.key(), "withdraw")
    }

    /// 입금 내역. `asset`이 없으면 전체 자산.
    async fn get_deposit_history(&self, _asset: Option<&str>) -> ExchangeResult<Vec<Deposit>> {
        not_supported(self.key(), "get_deposit_history")
    }

    /// 출금 내역. `asset`이 없으면 전체 자산.
    async fn get_withdraw_history(&self, _asset: Option<&str>) -> ExchangeResult<Vec<Withdraw>> {
        not_supported(self.key(), "get_withdraw_history")
    }
}

/// 통화쌍 인자를 검사합니다. 빈 기준/호가 자산은 네트워크 호출 전에 거부됩니다.
pub(crate) fn require_symbol(symbol: &Symbol) -> ExchangeResult<()> {
    symbol
        .validate()
        .map_err(|e| ExchangeError::invalid_argument("symbol", e.to_string()))
}

/// 빈 문자열 인자를 거부합니다.
pub(crate) fn require_non_empty(argument: &str, value: &str) -> ExchangeResult<()> {
    if value.trim().is_empty() {
        return Err(ExchangeError::invalid_argument(
            argument,
            format!("{} cannot be empty", argument),
        ));
    }
    Ok(())
}
