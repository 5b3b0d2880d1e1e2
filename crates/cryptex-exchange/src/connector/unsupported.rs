//! 아직 구현되지 않은 거래소용 클라이언트.
//!
//! 메타데이터만 제공하며 모든 작업은 `ExchangeError::NotSupported`를 반환합니다.

use async_trait::async_trait;
use cryptex_core::ExchangeName;

use crate::traits::ExchangeClient;

/// 메타데이터 전용 거래소 클라이언트.
#[derive(Debug, Clone)]
pub struct UnsupportedExchangeClient {
    exchange: ExchangeName,
    base_url: String,
}

impl UnsupportedExchangeClient {
    pub fn new(exchange: ExchangeName) -> Self {
        Self {
            exchange,
            base_url: exchange.website().to_string(),
        }
    }
}

#[async_trait]
impl ExchangeClient for UnsupportedExchangeClient {
    fn key(&self) -> ExchangeName {
        self.exchange
    }

    fn url(&self) -> &str {
        &self.base_url
    }

    fn api_version(&self) -> &str {
        ""
    }
}
