//! 거래소 중립적인 도메인 모델.

mod account;
mod exchange;
mod market_data;
mod order;

pub use account::*;
pub use exchange::*;
pub use market_data::*;
pub use order::*;
