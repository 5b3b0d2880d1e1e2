//! 정규화된 계좌 모델.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderSide, OrderStatus, OrderType, TimeInForce};
use crate::types::{Price, Quantity};

/// 자산별 잔고.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    /// 자산 코드 (예: "BTC")
    pub asset: String,
    /// 사용 가능한 잔고
    pub free: Quantity,
    /// 주문에 묶인 잔고
    pub locked: Quantity,
}

impl AssetBalance {
    /// 총 잔고 (사용 가능 + 묶인 잔고).
    pub fn total(&self) -> Quantity {
        self.free + self.locked
    }

    /// 잔고가 비어 있는지.
    pub fn is_empty(&self) -> bool {
        self.total() == Decimal::ZERO
    }
}

/// 계좌 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// 수수료 (bps)
    pub maker_commission: i64,
    pub taker_commission: i64,
    pub buyer_commission: i64,
    pub seller_commission: i64,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    pub balances: Vec<AssetBalance>,
}

impl AccountInfo {
    /// 특정 자산의 잔고. 대소문자 무시.
    pub fn balance(&self, asset: &str) -> Option<&AssetBalance> {
        self.balances
            .iter()
            .find(|b| b.asset.eq_ignore_ascii_case(asset))
    }
}

/// 주문 조회 결과.
///
/// 알 수 없는 상태/유형 문자열은 `None`으로 남습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub client_order_id: Option<String>,
    /// 거래소 표기 통화쌍
    pub pair: String,
    pub side: Option<OrderSide>,
    pub order_type: Option<OrderType>,
    pub time_in_force: Option<TimeInForce>,
    pub status: Option<OrderStatus>,
    pub price: Price,
    pub stop_price: Price,
    pub original_quantity: Quantity,
    pub executed_quantity: Quantity,
    pub iceberg_quantity: Quantity,
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// 미체결 잔량.
    pub fn remaining_quantity(&self) -> Quantity {
        (self.original_quantity - self.executed_quantity).max(Decimal::ZERO)
    }
}

/// 신규 주문 접수 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub pair: String,
    pub order_id: String,
    pub client_order_id: Option<String>,
    pub transact_time: Option<DateTime<Utc>>,
}

/// 주문 취소 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanceledOrder {
    pub pair: String,
    pub order_id: String,
    pub client_order_id: Option<String>,
    pub orig_client_order_id: Option<String>,
}

/// 계좌 체결 내역.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub order_id: Option<String>,
    pub price: Price,
    pub quantity: Quantity,
    pub commission: Decimal,
    pub commission_asset: String,
    pub time: Option<DateTime<Utc>>,
    pub is_buyer: bool,
    pub is_maker: bool,
    pub is_best_match: bool,
}

/// 입금 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositStatus {
    Pending,
    Success,
}

impl DepositStatus {
    /// 거래소 상태 코드 (0: 대기, 1: 성공).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DepositStatus::Pending),
            1 => Some(DepositStatus::Success),
            _ => None,
        }
    }
}

/// 입금 내역.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub asset: String,
    pub amount: Decimal,
    pub status: Option<DepositStatus>,
    pub address: Option<String>,
    pub tx_id: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// 출금 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawStatus {
    EmailSent,
    Cancelled,
    AwaitingApproval,
    Rejected,
    Processing,
    Failure,
    Completed,
}

impl WithdrawStatus {
    /// 거래소 상태 코드 (0..=6).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(WithdrawStatus::EmailSent),
            1 => Some(WithdrawStatus::Cancelled),
            2 => Some(WithdrawStatus::AwaitingApproval),
            3 => Some(WithdrawStatus::Rejected),
            4 => Some(WithdrawStatus::Processing),
            5 => Some(WithdrawStatus::Failure),
            6 => Some(WithdrawStatus::Completed),
            _ => None,
        }
    }
}

/// 출금 내역.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdraw {
    pub id: Option<String>,
    pub asset: String,
    pub amount: Decimal,
    pub address: String,
    pub tx_id: Option<String>,
    pub status: Option<WithdrawStatus>,
    pub date: Option<DateTime<Utc>>,
}

/// 출금 요청 접수 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    pub id: Option<String>,
    pub success: bool,
    pub message: String,
}
