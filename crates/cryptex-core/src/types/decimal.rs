//! 금융 수치를 위한 Decimal 유틸리티.
//!
//! 거래소는 가격과 수량을 대부분 문자열(`"0.00150000"`)로 내려주므로
//! 정규화 단계에서 공통 파서를 사용합니다.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 주문/잔고 수량 타입.
pub type Quantity = Decimal;

/// 문자열에서 Decimal을 파싱합니다. 실패하면 0을 반환합니다.
pub fn parse_decimal(s: &str) -> Decimal {
    s.trim().parse().unwrap_or(Decimal::ZERO)
}

/// 선택적 문자열 필드를 파싱합니다. 비어 있거나 잘못된 값은 `None`.
pub fn parse_decimal_opt(s: Option<&str>) -> Option<Decimal> {
    s.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("0.00150000"), dec!(0.0015));
        assert_eq!(parse_decimal(" 42 "), dec!(42));
        assert_eq!(parse_decimal("abc"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_decimal_opt() {
        assert_eq!(parse_decimal_opt(Some("1.5")), Some(dec!(1.5)));
        assert_eq!(parse_decimal_opt(Some("")), None);
        assert_eq!(parse_decimal_opt(None), None);
    }
}
