//! 암호화폐 거래소 REST 클라이언트.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `RestClient`: HMAC-SHA256 서명 요청 빌더
//! - `ExchangeClient` trait: 통합 거래소 인터페이스
//! - Binance, Bittrex 커넥터와 기타 거래소용 메타데이터 전용 클라이언트
//! - `ExchangeRegistry` / `CryptoClient`: 거래소 이름으로 클라이언트 조회

pub mod connector;
pub mod error;
pub mod registry;
pub mod rest;
pub mod traits;

pub use connector::*;
pub use error::*;
pub use registry::{CryptoClient, ExchangeRegistry};
pub use rest::RestClient;
pub use traits::{ExchangeClient, ExchangeResult};
