//! 거래소 에러 타입.

use cryptex_core::CoreError;
use thiserror::Error;

/// 거래소 호출 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 게이트웨이 타임아웃 (HTTP 504) 또는 전송 계층 타임아웃
    #[error("Request timeout: {0}")]
    RequestTimeout(String),

    /// 거래소가 반환한 에러 응답
    #[error("API error {code}: {message}")]
    ApiError { code: i32, message: String },

    /// 클라이언트 측 입력 검증 실패 (네트워크 호출 전)
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 성공 응답 본문 파싱 실패
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 서명이 필요한 요청에 자격증명이 없음
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 거래소가 지원하지 않는 작업
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// 레지스트리에 없는 거래소
    #[error("Exchange not found: {0}")]
    ExchangeNotFound(String),
}

impl ExchangeError {
    /// `InvalidArgument` 생성 헬퍼.
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        ExchangeError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// 타임아웃 에러인지 확인.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExchangeError::RequestTimeout(_))
    }

    /// 거래소 에러 코드 (API 에러인 경우).
    pub fn api_code(&self) -> Option<i32> {
        match self {
            ExchangeError::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 네트워크 호출 전에 발생한 클라이언트 측 에러인지 확인.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ExchangeError::InvalidArgument { .. }
                | ExchangeError::Unauthorized(_)
                | ExchangeError::NotSupported(_)
                | ExchangeError::ExchangeNotFound(_)
        )
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::RequestTimeout(err.to_string())
        } else {
            ExchangeError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::ParseError(err.to_string())
    }
}

impl From<CoreError> for ExchangeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(reason) => ExchangeError::invalid_argument("params", reason),
            CoreError::UnknownExchange(name) => ExchangeError::ExchangeNotFound(name),
            CoreError::Config(reason) => ExchangeError::invalid_argument("config", reason),
        }
    }
}
