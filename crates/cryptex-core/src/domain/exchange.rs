//! 지원 거래소 식별자.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 레지스트리 키로 사용되는 거래소 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeName {
    Binance,
    Bitfinex,
    Bithumb,
    Bitstamp,
    Bittrex,
    Bleutrade,
    CexIo,
    Cryptopia,
    EtherDelta,
    HitBtc,
    Kraken,
    Liqui,
    Poloniex,
    YoBit,
}

impl ExchangeName {
    /// 알려진 모든 거래소.
    pub const ALL: [ExchangeName; 14] = [
        ExchangeName::Binance,
        ExchangeName::Bitfinex,
        ExchangeName::Bithumb,
        ExchangeName::Bitstamp,
        ExchangeName::Bittrex,
        ExchangeName::Bleutrade,
        ExchangeName::CexIo,
        ExchangeName::Cryptopia,
        ExchangeName::EtherDelta,
        ExchangeName::HitBtc,
        ExchangeName::Kraken,
        ExchangeName::Liqui,
        ExchangeName::Poloniex,
        ExchangeName::YoBit,
    ];

    /// 레지스트리 조회 키 (예: "Binance").
    pub fn key(&self) -> &'static str {
        match self {
            ExchangeName::Binance => "Binance",
            ExchangeName::Bitfinex => "Bitfinex",
            ExchangeName::Bithumb => "Bithumb",
            ExchangeName::Bitstamp => "Bitstamp",
            ExchangeName::Bittrex => "Bittrex",
            ExchangeName::Bleutrade => "Bleutrade",
            ExchangeName::CexIo => "CEXIO",
            ExchangeName::Cryptopia => "Cryptopia",
            ExchangeName::EtherDelta => "Etherdelta",
            ExchangeName::HitBtc => "HitBTC",
            ExchangeName::Kraken => "Kraken",
            ExchangeName::Liqui => "Liqui",
            ExchangeName::Poloniex => "Poloniex",
            ExchangeName::YoBit => "YoBit",
        }
    }

    /// 공개 웹사이트 주소.
    pub fn website(&self) -> &'static str {
        match self {
            ExchangeName::Binance => "https://www.binance.com",
            ExchangeName::Bitfinex => "https://www.bitfinex.com",
            ExchangeName::Bithumb => "https://www.bithumb.com",
            ExchangeName::Bitstamp => "https://www.bitstamp.net",
            ExchangeName::Bittrex => "https://bittrex.com",
            ExchangeName::Bleutrade => "https://bleutrade.com",
            ExchangeName::CexIo => "https://cex.io",
            ExchangeName::Cryptopia => "https://www.cryptopia.co.nz",
            ExchangeName::EtherDelta => "https://etherdelta.com",
            ExchangeName::HitBtc => "https://hitbtc.com",
            ExchangeName::Kraken => "https://www.kraken.com",
            ExchangeName::Liqui => "https://liqui.io",
            ExchangeName::Poloniex => "https://poloniex.com",
            ExchangeName::YoBit => "https://yobit.net",
        }
    }
}

impl fmt::Display for ExchangeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExchangeName {
    type Err = CoreError;

    /// 대소문자를 구분하지 않고 키를 매칭합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownExchange(s.to_string()))
    }
}

/// REST 요청 HTTP 메서드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ApiMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
