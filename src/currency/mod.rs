//! Money formatting for display surfaces.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => format!("{code} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats `value` with `precision` decimals and comma thousands grouping.
pub fn format_number(value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let sign = if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{frac_part}", group_digits(int_part, ','))
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `-$1,234.50` style rendering.
pub fn format_currency(amount: f64, code: &CurrencyCode) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(amount.abs(), precision);
    let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{body}", symbol_for(code.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(-1500.5, 1), "-1,500.5");
    }

    #[test]
    fn formats_known_and_unknown_currencies() {
        let usd = CurrencyCode::default();
        assert_eq!(format_currency(1234.5, &usd), "$1,234.50");
        assert_eq!(format_currency(-12.0, &usd), "-$12.00");
        assert_eq!(format_currency(-0.001, &usd), "$0.00");
        assert_eq!(format_currency(1500.0, &CurrencyCode::new("jpy")), "¥1,500");
        assert_eq!(format_currency(10.0, &CurrencyCode::new("sek")), "SEK 10.00");
    }
}
