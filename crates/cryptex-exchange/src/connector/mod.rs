//! 거래소 커넥터.

pub mod binance;
pub mod bittrex;
pub mod unsupported;

pub use binance::{BinanceClient, BINANCE_API_URL, DEFAULT_ORDER_BOOK_LIMIT};
pub use bittrex::{BittrexClient, BITTREX_API_URL};
pub use unsupported::UnsupportedExchangeClient;
