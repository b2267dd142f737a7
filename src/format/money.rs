//! Currency display settings and amount rendering.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Thousands grouping applied to the integer part of an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    None,
    Comma,
    Period,
    Space,
    Apostrophe,
}

impl Grouping {
    fn separator(&self) -> Option<char> {
        match self {
            Grouping::None => None,
            Grouping::Comma => Some(','),
            Grouping::Period => Some('.'),
            Grouping::Space => Some(' '),
            Grouping::Apostrophe => Some('\''),
        }
    }
}

impl FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Grouping::None),
            "comma" => Ok(Grouping::Comma),
            "period" | "dot" => Ok(Grouping::Period),
            "space" => Ok(Grouping::Space),
            "apostrophe" => Ok(Grouping::Apostrophe),
            _ => Err(format!(
                "Unknown grouping: {}. Use: none, comma, period, space, apostrophe",
                s
            )),
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Grouping::None => "none",
            Grouping::Comma => "comma",
            Grouping::Period => "period",
            Grouping::Space => "space",
            Grouping::Apostrophe => "apostrophe",
        };
        write!(f, "{}", name)
    }
}

/// How monetary amounts are shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 code (GBP, USD, EUR, ...)
    pub currency_code: String,
    /// Character between whole and fractional units
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
    /// Thousands grouping style
    #[serde(default)]
    pub grouping: Grouping,
}

fn default_decimal_separator() -> char {
    '.'
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("GBP", '.', Grouping::None)
    }
}

impl CurrencyFormat {
    pub fn new(currency_code: impl Into<String>, decimal_separator: char, grouping: Grouping) -> Self {
        Self { currency_code: currency_code.into().to_uppercase(), decimal_separator, grouping }
    }

    /// Symbol shown before the amount.
    pub fn symbol(&self) -> String {
        match self.currency_code.as_str() {
            "GBP" => "£".to_string(),
            "USD" => "$".to_string(),
            "EUR" => "€".to_string(),
            "JPY" => "¥".to_string(),
            code => format!("{} ", code),
        }
    }

    /// Number of minor-unit digits shown for this currency.
    pub fn precision(&self) -> u32 {
        match self.currency_code.as_str() {
            "JPY" | "KRW" | "HUF" => 0,
            _ => 2,
        }
    }

    /// Renders an amount, rounding half away from zero to the currency precision.
    pub fn format(&self, amount: Decimal) -> String {
        let precision = self.precision();
        let mut rounded =
            amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(precision);
        self.render(rounded)
    }

    /// Renders an amount without rounding. Digits beyond the currency
    /// precision are kept; shorter amounts are padded to it.
    pub fn format_exact(&self, amount: Decimal) -> String {
        let mut padded = amount;
        if padded.scale() < self.precision() {
            padded.rescale(self.precision());
        }
        self.render(padded)
    }

    fn render(&self, amount: Decimal) -> String {
        let negative = amount.is_sign_negative() && !amount.is_zero();
        let digits = amount.abs().to_string();
        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol());
        out.push_str(&self.group(whole));
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    fn group(&self, whole: &str) -> String {
        let Some(sep) = self.grouping.separator() else {
            return whole.to_string();
        };

        let len = whole.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_gbp_default() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(dec("8")), "£8.00");
        assert_eq!(fmt.format(dec("10.5")), "£10.50");
        assert_eq!(fmt.format(dec("1234567.891")), "£1234567.89");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(dec("2.345")), "£2.35");
        assert_eq!(fmt.format(dec("2.344")), "£2.34");
        assert_eq!(fmt.format(dec("0.005")), "£0.01");
    }

    #[test]
    fn test_format_exact_keeps_extra_digits() {
        let gbp = CurrencyFormat::default();
        assert_eq!(gbp.format_exact(dec("5.005")), "£5.005");
        assert_eq!(gbp.format_exact(dec("10")), "£10.00");
        assert_eq!(gbp.format_exact(dec("12.5")), "£12.50");

        let jpy = CurrencyFormat::new("JPY", '.', Grouping::Comma);
        assert_eq!(jpy.format_exact(dec("1500")), "¥1,500");
        assert_eq!(jpy.format_exact(dec("1500.5")), "¥1,500.5");
    }

    #[test]
    fn test_decimal_sum_is_exact() {
        let fmt = CurrencyFormat::default();
        let total = dec("0.1") + dec("0.2");
        assert_eq!(total, dec("0.3"));
        assert_eq!(fmt.format(total), "£0.30");
    }

    #[test]
    fn test_grouping_styles() {
        let amount = dec("1234567.5");
        assert_eq!(
            CurrencyFormat::new("USD", '.', Grouping::Comma).format(amount),
            "$1,234,567.50"
        );
        assert_eq!(
            CurrencyFormat::new("EUR", ',', Grouping::Period).format(amount),
            "€1.234.567,50"
        );
        assert_eq!(
            CurrencyFormat::new("CHF", '.', Grouping::Apostrophe).format(amount),
            "CHF 1'234'567.50"
        );
        assert_eq!(CurrencyFormat::new("SEK", ',', Grouping::Space).format(dec("999")), "SEK 999,00");
        assert_eq!(
            CurrencyFormat::new("USD", '.', Grouping::Comma).format(dec("100000")),
            "$100,000.00"
        );
    }

    #[test]
    fn test_zero_precision_currency() {
        let fmt = CurrencyFormat::new("jpy", '.', Grouping::Comma);
        assert_eq!(fmt.currency_code, "JPY");
        assert_eq!(fmt.format(dec("1500.6")), "¥1,501");
    }

    #[test]
    fn test_negative_amount() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(dec("-3.2")), "-£3.20");
        assert_eq!(fmt.format(dec("-0.001")), "£0.00");
    }

    #[test]
    fn test_grouping_parsing() {
        assert_eq!("comma".parse::<Grouping>().unwrap(), Grouping::Comma);
        assert_eq!("DOT".parse::<Grouping>().unwrap(), Grouping::Period);
        assert_eq!("none".parse::<Grouping>().unwrap(), Grouping::None);
        let err = "tabs".parse::<Grouping>().unwrap_err();
        assert!(err.contains("Unknown grouping"));
    }

    #[test]
    fn test_currency_format_from_toml() {
        let fmt: CurrencyFormat = toml::from_str(
            r#"
            currency_code = "EUR"
            decimal_separator = ","
            grouping = "period"
            "#,
        )
        .unwrap();
        assert_eq!(fmt, CurrencyFormat::new("EUR", ',', Grouping::Period));

        let fmt: CurrencyFormat = toml::from_str(r#"currency_code = "USD""#).unwrap();
        assert_eq!(fmt.decimal_separator, '.');
        assert_eq!(fmt.grouping, Grouping::None);
    }
}
