//! # Cryptex Core
//!
//! 거래소 클라이언트 전반에서 사용하는 핵심 타입을 제공합니다:
//! - 정규화된 시장 데이터 및 계좌 모델
//! - 주문 타입과 신규 주문 파라미터
//! - 통화쌍 심볼, 캔들 간격, API 자격증명
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::{init_logging, init_logging_from_env, LogConfig, LogFormat};
pub use types::*;
