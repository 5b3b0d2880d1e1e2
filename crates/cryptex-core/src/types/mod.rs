//! 크레이트 전반에서 사용되는 공통 타입.

mod credentials;
mod decimal;
mod interval;
mod symbol;

pub use credentials::*;
pub use decimal::*;
pub use interval::*;
pub use symbol::*;
