//! 캔들스틱 간격 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoreError;

/// 캔들스틱 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1분봉
    #[serde(rename = "1m")]
    OneMinute,
    /// 3분봉
    #[serde(rename = "3m")]
    ThreeMinutes,
    /// 5분봉
    #[serde(rename = "5m")]
    FiveMinutes,
    /// 15분봉
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// 30분봉
    #[serde(rename = "30m")]
    ThirtyMinutes,
    /// 1시간봉
    #[serde(rename = "1h")]
    OneHour,
    /// 2시간봉
    #[serde(rename = "2h")]
    TwoHours,
    /// 4시간봉
    #[serde(rename = "4h")]
    FourHours,
    /// 6시간봉
    #[serde(rename = "6h")]
    SixHours,
    /// 8시간봉
    #[serde(rename = "8h")]
    EightHours,
    /// 12시간봉
    #[serde(rename = "12h")]
    TwelveHours,
    /// 일봉
    #[serde(rename = "1d")]
    OneDay,
    /// 3일봉
    #[serde(rename = "3d")]
    ThreeDays,
    /// 주봉
    #[serde(rename = "1w")]
    OneWeek,
    /// 월봉
    #[serde(rename = "1M")]
    OneMonth,
}

impl Interval {
    const ALL: [Interval; 15] = [
        Interval::OneMinute,
        Interval::ThreeMinutes,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::TwoHours,
        Interval::FourHours,
        Interval::SixHours,
        Interval::EightHours,
        Interval::TwelveHours,
        Interval::OneDay,
        Interval::ThreeDays,
        Interval::OneWeek,
        Interval::OneMonth,
    ];

    /// 거래소 API에서 사용하는 간격 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::TwoHours => "2h",
            Interval::FourHours => "4h",
            Interval::SixHours => "6h",
            Interval::EightHours => "8h",
            Interval::TwelveHours => "12h",
            Interval::OneDay => "1d",
            Interval::ThreeDays => "3d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1M",
        }
    }

    /// 간격의 길이를 반환합니다.
    pub fn duration(&self) -> Duration {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;
        const DAY: u64 = 24 * HOUR;

        let secs = match self {
            Interval::OneMinute => MINUTE,
            Interval::ThreeMinutes => 3 * MINUTE,
            Interval::FiveMinutes => 5 * MINUTE,
            Interval::FifteenMinutes => 15 * MINUTE,
            Interval::ThirtyMinutes => 30 * MINUTE,
            Interval::OneHour => HOUR,
            Interval::TwoHours => 2 * HOUR,
            Interval::FourHours => 4 * HOUR,
            Interval::SixHours => 6 * HOUR,
            Interval::EightHours => 8 * HOUR,
            Interval::TwelveHours => 12 * HOUR,
            Interval::OneDay => DAY,
            Interval::ThreeDays => 3 * DAY,
            Interval::OneWeek => 7 * DAY,
            Interval::OneMonth => 30 * DAY, // 근사값
        };
        Duration::from_secs(secs)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("Invalid interval: {}", s)))
    }
}
