//! 도메인 계층 에러 타입.
//!
//! 거래소 호출 에러는 `cryptex-exchange`의 `ExchangeError`가 담당하며,
//! 이 모듈은 설정 로딩과 도메인 값 파싱에서 발생하는 에러만 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 알 수 없는 거래소
    #[error("알 수 없는 거래소: {0}")]
    UnknownExchange(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::UnknownExchange("mtgox".to_string());
        assert_eq!(err.to_string(), "알 수 없는 거래소: mtgox");
    }
}
