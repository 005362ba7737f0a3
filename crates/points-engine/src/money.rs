//! 金额解析
//!
//! 金额统一按整数分处理，避免二进制浮点带来的表示误差。

use std::fmt;

/// 以分为单位的金额
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(u64);

impl Cents {
    /// 解析十进制金额字符串，如 "35.35"、"9.00"、"12"
    ///
    /// 小数部分最多两位；负数、空串、非数字字符或溢出均返回 None。
    pub fn parse(input: &str) -> Option<Self> {
        let (whole, fraction) = match input.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (input, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if input.ends_with('.') {
            return None;
        }

        let dollars: u64 = whole.parse().ok()?;
        // "5.5" 表示 5 元 50 分
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().ok()? * 10,
            _ => fraction.parse::<u64>().ok()?,
        };

        dollars.checked_mul(100)?.checked_add(cents).map(Self)
    }

    /// 分位部分（0..=99）
    pub fn cents_part(self) -> u64 {
        self.0 % 100
    }

    /// 是否为整元金额
    pub fn is_round_dollar(self) -> bool {
        self.cents_part() == 0
    }

    /// 是否为 0.25 的整数倍
    pub fn is_multiple_of_quarter(self) -> bool {
        self.0 % 25 == 0
    }

    /// 金额乘以 0.2 后向上取整：ceil(cents / 500)
    pub fn fifth_rounded_up(self) -> u64 {
        self.0.div_ceil(500)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_decimal_amounts() {
        assert_eq!(Cents::parse("35.35"), Some(Cents(3535)));
        assert_eq!(Cents::parse("9.00"), Some(Cents(900)));
        assert_eq!(Cents::parse("0.01"), Some(Cents(1)));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(Cents::parse("12"), Some(Cents(1200)));
        assert_eq!(Cents::parse("5.5"), Some(Cents(550)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", ".50", "5.", "-1.00", "1.234", "abc", "1,00", " 1.00", "1.0a"] {
            assert_eq!(Cents::parse(input), None, "input {:?} should be rejected", input);
        }
    }

    #[test]
    fn test_parse_overflow() {
        assert_eq!(Cents::parse("184467440737095516.15"), Some(Cents(u64::MAX)));
        assert_eq!(Cents::parse("184467440737095516.16"), None);
    }

    #[test]
    fn test_round_dollar_and_quarter() {
        let nine = Cents::parse("9.00").unwrap();
        assert!(nine.is_round_dollar());
        assert!(nine.is_multiple_of_quarter());

        let quarter = Cents::parse("5.25").unwrap();
        assert!(!quarter.is_round_dollar());
        assert!(quarter.is_multiple_of_quarter());

        let odd = Cents::parse("35.35").unwrap();
        assert!(!odd.is_round_dollar());
        assert!(!odd.is_multiple_of_quarter());
    }

    #[test]
    fn test_fifth_rounded_up() {
        assert_eq!(Cents::parse("12.25").unwrap().fifth_rounded_up(), 3);
        assert_eq!(Cents::parse("12.00").unwrap().fifth_rounded_up(), 3);
        assert_eq!(Cents::parse("3.00").unwrap().fifth_rounded_up(), 1);
        assert_eq!(Cents::parse("5.00").unwrap().fifth_rounded_up(), 1);
        assert_eq!(Cents::parse("5.01").unwrap().fifth_rounded_up(), 2);
        assert_eq!(Cents::parse("0.00").unwrap().fifth_rounded_up(), 0);
    }

    #[test]
    fn test_display_normalizes_fraction() {
        assert_eq!(Cents::parse("7.05").unwrap().to_string(), "7.05");
        assert_eq!(Cents::parse("5.5").unwrap().to_string(), "5.50");
        assert_eq!(Cents::parse("12").unwrap().to_string(), "12.00");
    }
}
