//! 주문 타입 및 신규 주문 파라미터.
//!
//! 이 모듈은 주문 관련 타입을 정의합니다:
//! - `OrderSide` - 주문 방향 (매수/매도)
//! - `OrderType` - 주문 유형 (시장가, 지정가, 손절, 익절)
//! - `TimeInForce` - 주문 유효 기간
//! - `OrderStatus` - 거래소가 보고하는 주문 상태
//! - `NewOrderParams` - 신규 주문 요청

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::{Price, Quantity, Symbol};

/// 주문 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl OrderSide {
    /// 거래소 표기 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }

    /// 거래소 표기에서 파싱. 대소문자 무시.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Some(OrderSide::Buy),
            "SELL" => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 주문 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// 지정가 주문
    Limit,
    /// 시장가 주문
    Market,
    /// 손절 주문 (스톱 가격 도달 시 시장가)
    StopLoss,
    /// 지정가 손절 주문
    StopLossLimit,
    /// 익절 주문 (스톱 가격 도달 시 시장가)
    TakeProfit,
    /// 지정가 익절 주문
    TakeProfitLimit,
}

impl OrderType {
    /// 거래소 표기 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "STOP_LOSS",
            OrderType::StopLossLimit => "STOP_LOSS_LIMIT",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
        }
    }

    /// 거래소 표기에서 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LIMIT" => Some(OrderType::Limit),
            "MARKET" => Some(OrderType::Market),
            "STOP_LOSS" => Some(OrderType::StopLoss),
            "STOP_LOSS_LIMIT" => Some(OrderType::StopLossLimit),
            "TAKE_PROFIT" => Some(OrderType::TakeProfit),
            "TAKE_PROFIT_LIMIT" => Some(OrderType::TakeProfitLimit),
            _ => None,
        }
    }

    /// 지정가(및 유효 기간)가 필요한 유형인지.
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::StopLossLimit | OrderType::TakeProfitLimit
        )
    }

    /// 스톱 가격이 필요한 유형인지.
    pub fn requires_stop_price(&self) -> bool {
        matches!(
            self,
            OrderType::StopLoss
                | OrderType::StopLossLimit
                | OrderType::TakeProfit
                | OrderType::TakeProfitLimit
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 주문 유효 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// 취소될 때까지 유효 (Good Till Cancelled)
    #[default]
    Gtc,
    /// 즉시 체결 후 잔량 취소 (Immediate Or Cancel)
    Ioc,
}

impl TimeInForce {
    /// 거래소 표기 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
        }
    }

    /// 거래소 표기에서 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GTC" => Some(TimeInForce::Gtc),
            "IOC" => Some(TimeInForce::Ioc),
            _ => None,
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 거래소가 보고하는 주문 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 접수됨 (미체결)
    New,
    /// 부분 체결
    PartiallyFilled,
    /// 전량 체결
    Filled,
    /// 취소됨
    Canceled,
    /// 취소 처리 중
    PendingCancel,
    /// 거부됨
    Rejected,
    /// 만료됨
    Expired,
}

impl OrderStatus {
    /// 거래소 표기에서 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Some(OrderStatus::New),
            "PARTIALLY_FILLED" => Some(OrderStatus::PartiallyFilled),
            "FILLED" => Some(OrderStatus::Filled),
            "CANCELED" | "CANCELLED" => Some(OrderStatus::Canceled),
            "PENDING_CANCEL" => Some(OrderStatus::PendingCancel),
            "REJECTED" => Some(OrderStatus::Rejected),
            "EXPIRED" => Some(OrderStatus::Expired),
            _ => None,
        }
    }

    /// 더 이상 상태가 바뀌지 않는 최종 상태인지.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Canceled | OrderStatus::Rejected | OrderStatus::Expired
        )
    }
}

/// 신규 주문 요청 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderParams {
    /// 거래쌍
    pub symbol: Symbol,
    /// 주문 방향
    pub side: OrderSide,
    /// 주문 유형
    pub order_type: OrderType,
    /// 주문 수량
    pub quantity: Quantity,
    /// 지정가 (지정가 계열 주문에 필수)
    pub price: Option<Price>,
    /// 스톱 가격 (손절/익절 계열 주문에 필수)
    pub stop_price: Option<Price>,
    /// 유효 기간 (지정가 계열에만 전송)
    pub time_in_force: TimeInForce,
    /// 빙산 주문 노출 수량
    pub iceberg_quantity: Option<Quantity>,
    /// 클라이언트 주문 ID
    pub client_order_id: Option<String>,
}

impl NewOrderParams {
    fn base(symbol: Symbol, side: OrderSide, order_type: OrderType, quantity: Quantity) -> Self {
        Self {
            symbol,
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: TimeInForce::Gtc,
            iceberg_quantity: None,
            client_order_id: None,
        }
    }

    /// 지정가 주문.
    pub fn limit(symbol: Symbol, side: OrderSide, quantity: Quantity, price: Price) -> Self {
        let mut params = Self::base(symbol, side, OrderType::Limit, quantity);
        params.price = Some(price);
        params
    }

    /// 시장가 주문.
    pub fn market(symbol: Symbol, side: OrderSide, quantity: Quantity) -> Self {
        Self::base(symbol, side, OrderType::Market, quantity)
    }

    /// 주문 유형을 직접 지정.
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// 스톱 가격 설정.
    pub fn with_stop_price(mut self, stop_price: Price) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// 유효 기간 설정.
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// 빙산 주문 수량 설정.
    pub fn with_iceberg_quantity(mut self, quantity: Quantity) -> Self {
        self.iceberg_quantity = Some(quantity);
        self
    }

    /// 클라이언트 주문 ID 설정.
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// 주문 유형별 필수 필드를 검사합니다.
    ///
    /// 거래소 고유 규칙(최소 수량, 호가 단위 등)은 검사하지 않습니다.
    pub fn validate(&self) -> CoreResult<()> {
        self.symbol.validate()?;

        if self.quantity <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }

        if self.order_type.requires_price() {
            match self.price {
                Some(price) if price > Decimal::ZERO => {}
                _ => {
                    return Err(CoreError::InvalidInput(format!(
                        "{} order requires a positive price",
                        self.order_type
                    )))
                }
            }
        }

        if self.order_type.requires_stop_price() {
            match self.stop_price {
                Some(stop) if stop > Decimal::ZERO => {}
                _ => {
                    return Err(CoreError::InvalidInput(format!(
                        "{} order requires a positive stop price",
                        self.order_type
                    )))
                }
            }
        }

        if let Some(iceberg) = self.iceberg_quantity {
            if iceberg <= Decimal::ZERO || iceberg >= self.quantity {
                return Err(CoreError::InvalidInput(
                    "iceberg quantity must be between zero and the order quantity".to_string(),
                ));
            }
            if !self.order_type.requires_price() {
                return Err(CoreError::InvalidInput(
                    "iceberg quantity is only allowed on limit orders".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// REST 쿼리 문자열로 변환 (`symbol=ETHBTC&side=BUY&type=LIMIT&...`).
    ///
    /// 가격/수량은 뒤쪽 0을 제거해 전송합니다. `timeInForce`는 지정가 계열에만 붙습니다.
    /// 값은 퍼센트 인코딩됩니다.
    pub fn to_query(&self) -> String {
        let mut params: Vec<(&str, String)> = vec![
            ("symbol", self.symbol.concatenated()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type.as_str().to_string()),
        ];

        if self.order_type.requires_price() {
            params.push(("timeInForce", self.time_in_force.as_str().to_string()));
        }
        params.push(("quantity", self.quantity.normalize().to_string()));
        if let Some(price) = self.price {
            params.push(("price", price.normalize().to_string()));
        }
        if let Some(stop_price) = self.stop_price {
            params.push(("stopPrice", stop_price.normalize().to_string()));
        }
        if let Some(iceberg) = self.iceberg_quantity {
            params.push(("icebergQty", iceberg.normalize().to_string()));
        }
        if let Some(id) = &self.client_order_id {
            params.push(("newClientOrderId", id.clone()));
        }

        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
