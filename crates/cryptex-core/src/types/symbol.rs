//! 거래쌍 심볼 정의.
//!
//! `Symbol`은 기준 자산(base)과 호가 자산(quote)으로 구성됩니다.
//! 거래소별 표기(`ETHBTC`, `BTC-ETH` 등)로의 변환은 각 커넥터가 담당합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// 거래 가능한 통화쌍.
///
/// 예: `ETH/BTC`는 BTC로 가격이 매겨지는 ETH.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// 기준 자산 (예: ETH)
    pub base: String,
    /// 호가 자산 (예: BTC, USDT)
    pub quote: String,
}

impl Symbol {
    /// 새 심볼을 생성합니다. 자산 코드는 대문자로 정규화됩니다.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().trim().to_uppercase(),
            quote: quote.into().trim().to_uppercase(),
        }
    }

    /// 암호화폐 통화쌍을 생성합니다.
    pub fn crypto(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self::new(base, quote)
    }

    /// "BASE/QUOTE" 형식 문자열에서 심볼을 파싱합니다.
    pub fn from_string(s: &str) -> Option<Self> {
        let (base, quote) = s.split_once('/')?;
        if base.trim().is_empty() || quote.trim().is_empty() || quote.contains('/') {
            return None;
        }
        Some(Self::new(base, quote))
    }

    /// 기준/호가 자산이 모두 채워져 있는지 검사합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.base.trim().is_empty() {
            return Err(CoreError::InvalidInput("base asset cannot be empty".to_string()));
        }
        if self.quote.trim().is_empty() {
            return Err(CoreError::InvalidInput("quote asset cannot be empty".to_string()));
        }
        Ok(())
    }

    /// 구분자 없이 이어붙인 통화쌍 (예: `ETHBTC`).
    pub fn concatenated(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
