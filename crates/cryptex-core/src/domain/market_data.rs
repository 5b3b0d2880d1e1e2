//! 정규화된 시장 데이터 모델.
//!
//! 거래소별 JSON 형태는 각 커넥터에서 이 구조체들로 변환됩니다:
//! - `CurrencyInfo` - 거래쌍 메타데이터
//! - `TickerInfo` / `TickerPrice` / `PriceChangeInfo` - 시세
//! - `OrderBook` / `OrderBookTicker` - 호가
//! - `Candlestick` / `AggregateTrade` - 캔들 및 체결

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Interval, Price, Quantity, Symbol};

/// 거래쌍 메타데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// 거래소 표기 통화쌍 (예: `ETHBTC`, `BTC-ETH`)
    pub pair: String,
    /// 기준/호가 자산
    pub symbol: Symbol,
    /// 최소 주문 금액 또는 수량 (거래소가 제공하는 경우)
    pub min_trade_price: Option<Decimal>,
    /// 거래 가능 여부
    pub is_active: bool,
}

/// 24시간 시세 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    /// 거래소 표기 통화쌍
    pub pair: String,
    pub bid_price: Price,
    pub ask_price: Price,
    pub last_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    /// 거래량 (기준 자산 단위)
    pub volume: Quantity,
}

impl TickerInfo {
    /// 매도/매수 호가 차이.
    pub fn spread(&self) -> Decimal {
        self.ask_price - self.bid_price
    }
}

/// 최근 체결가.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
    /// 거래소 표기 통화쌍
    pub pair: String,
    /// 최근 체결가
    pub price: Price,
}

/// 24시간 가격 변동 통계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeInfo {
    pub pair: String,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    pub weighted_avg_price: Price,
    pub prev_close_price: Price,
    pub last_price: Price,
    pub bid_price: Price,
    pub ask_price: Price,
    pub open_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    pub volume: Quantity,
    pub open_time: Option<DateTime<Utc>>,
    pub close_time: Option<DateTime<Utc>>,
    pub first_trade_id: i64,
    pub last_trade_id: i64,
    /// 체결 건수
    pub count: u64,
}

/// 호가 한 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookOffer {
    pub price: Price,
    pub quantity: Quantity,
}

/// 호가창 스냅샷.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// 매수 호가 (높은 가격 순)
    pub bids: Vec<OrderBookOffer>,
    /// 매도 호가 (낮은 가격 순)
    pub asks: Vec<OrderBookOffer>,
}

impl OrderBook {
    /// 최우선 매수 호가.
    pub fn best_bid(&self) -> Option<&OrderBookOffer> {
        self.bids.first()
    }

    /// 최우선 매도 호가.
    pub fn best_ask(&self) -> Option<&OrderBookOffer> {
        self.asks.first()
    }

    /// 중간 가격.
    pub fn mid_price(&self) -> Option<Price> {
        let bid = self.best_bid()?.price;
        let ask = self.best_ask()?.price;
        Some((bid + ask) / Decimal::TWO)
    }
}

/// 거래쌍별 최우선 호가.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookTicker {
    pub pair: String,
    pub bid_price: Price,
    pub bid_quantity: Quantity,
    pub ask_price: Price,
    pub ask_quantity: Quantity,
}

/// OHLCV 캔들스틱.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candlestick {
    pub interval: Interval,
    pub open_time: DateTime<Utc>,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// 거래량 (기준 자산 단위)
    pub volume: Quantity,
    pub close_time: DateTime<Utc>,
    /// 거래대금 (호가 자산 단위)
    pub quote_volume: Decimal,
    pub trade_count: u64,
}

/// 집계 체결.
///
/// 같은 주문, 같은 가격으로 동시에 체결된 거래를 하나로 묶은 것.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTrade {
    pub aggregate_trade_id: i64,
    pub price: Price,
    pub quantity: Quantity,
    pub first_trade_id: i64,
    pub last_trade_id: i64,
    pub timestamp: DateTime<Utc>,
    /// 매수자가 메이커였는지 (true면 매도 주도 체결)
    pub buyer_is_maker: bool,
    pub best_price_match: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_book_mid_price() {
        let book = OrderBook {
            bids: vec![OrderBookOffer {
                price: dec!(0.0500),
                quantity: dec!(3),
            }],
            asks: vec![OrderBookOffer {
                price: dec!(0.0502),
                quantity: dec!(1),
            }],
        };

        assert_eq!(book.mid_price(), Some(dec!(0.0501)));
        assert!(OrderBook::default().mid_price().is_none());
    }

    #[test]
    fn test_ticker_spread() {
        let ticker = TickerInfo {
            pair: "ETHBTC".to_string(),
            bid_price: dec!(0.05),
            ask_price: dec!(0.0502),
            last_price: dec!(0.0501),
            high_price: dec!(0.06),
            low_price: dec!(0.04),
            volume: dec!(1000),
        };
        assert_eq!(ticker.spread(), dec!(0.0002));
    }
}
