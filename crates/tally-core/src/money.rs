//! Amount and currency resolution
//!
//! Only the first money expression and the first bare number are consulted;
//! people tend to say the total first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::Currency;
use crate::numbers;

/// Digit group with optional thousands separators and a two-digit decimal part
static AMOUNT_IN_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d{2})?").expect("valid regex"));

static CURRENCY_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)yen|jpy|¥|dollars?|usd|bucks|\$|rupiahs?|idr|\brp\b").expect("valid regex")
});

/// Resolved amount and currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

/// Map a currency marker to its code
pub fn currency_for_marker(marker: &str) -> Option<Currency> {
    match marker.to_lowercase().as_str() {
        "yen" | "jpy" | "¥" => Some(Currency::Jpy),
        "dollar" | "dollars" | "usd" | "bucks" | "$" => Some(Currency::Usd),
        "rupiah" | "rupiahs" | "idr" | "rp" => Some(Currency::Idr),
        _ => None,
    }
}

fn amount_in_span(span: &str) -> f64 {
    if let Some(m) = AMOUNT_IN_SPAN.find(span) {
        return numbers::parse_digits(m.as_str()).unwrap_or(0.0);
    }
    // "twenty five dollars"
    let lowered = span.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    (0..words.len())
        .find_map(|i| numbers::parse_spelled(&words[i..]))
        .map(|(value, _)| value as f64)
        .unwrap_or(0.0)
}

/// Resolve the spending amount and currency
///
/// The first money expression supplies both; when it yields no positive
/// amount, the first bare number is used instead and the currency stays as
/// found (or `default_currency` when the expression had no marker).
/// Unparsable numbers resolve to 0 rather than failing.
pub fn resolve_money(money: &[String], amounts: &[String], default_currency: Currency) -> Money {
    let mut amount = 0.0;
    let mut currency = default_currency;

    if let Some(span) = money.first() {
        amount = amount_in_span(span);
        if let Some(found) = CURRENCY_MARKER
            .find(span)
            .and_then(|m| currency_for_marker(m.as_str()))
        {
            currency = found;
        }
    }

    if amount <= 0.0 {
        if let Some(first) = amounts.first() {
            amount = numbers::parse_amount(first).unwrap_or(0.0);
        }
    }

    Money { amount, currency }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_yen_expression() {
        let m = resolve_money(&spans(&["680 yen"]), &spans(&["680"]), Currency::Usd);
        assert_eq!(m.amount, 680.0);
        assert_eq!(m.currency, Currency::Jpy);
    }

    #[test]
    fn test_dollar_symbol() {
        let m = resolve_money(&spans(&["$25"]), &[], Currency::Usd);
        assert_eq!(m.amount, 25.0);
        assert_eq!(m.currency, Currency::Usd);
    }

    #[test]
    fn test_thousands_separator_and_decimals() {
        let m = resolve_money(&spans(&["¥1,200"]), &[], Currency::Usd);
        assert_eq!(m.amount, 1200.0);
        assert_eq!(m.currency, Currency::Jpy);

        let m = resolve_money(&spans(&["12.99 dollars"]), &[], Currency::Jpy);
        assert_eq!(m.amount, 12.99);
        assert_eq!(m.currency, Currency::Usd);
    }

    #[test]
    fn test_rupiah() {
        let m = resolve_money(&spans(&["50,000 rupiah"]), &[], Currency::Usd);
        assert_eq!(m.amount, 50000.0);
        assert_eq!(m.currency, Currency::Idr);
    }

    #[test]
    fn test_falls_back_to_bare_amount_with_default_currency() {
        let m = resolve_money(&[], &spans(&["15.50"]), Currency::Usd);
        assert_eq!(m.amount, 15.5);
        assert_eq!(m.currency, Currency::Usd);

        let m = resolve_money(&[], &spans(&["1,500"]), Currency::Jpy);
        assert_eq!(m.amount, 1500.0);
        assert_eq!(m.currency, Currency::Jpy);
    }

    #[test]
    fn test_spelled_money() {
        let m = resolve_money(&spans(&["twenty five dollars"]), &[], Currency::Jpy);
        assert_eq!(m.amount, 25.0);
        assert_eq!(m.currency, Currency::Usd);
    }

    #[test]
    fn test_zero_money_keeps_currency_and_uses_amounts() {
        let m = resolve_money(&spans(&["0 yen"]), &spans(&["0", "450"]), Currency::Usd);
        assert_eq!(m.amount, 0.0);
        assert_eq!(m.currency, Currency::Jpy);

        let m = resolve_money(&spans(&["yen"]), &spans(&["450"]), Currency::Usd);
        assert_eq!(m.amount, 450.0);
        assert_eq!(m.currency, Currency::Jpy);
    }

    #[test]
    fn test_only_first_spans_are_used() {
        let m = resolve_money(
            &spans(&["300 yen", "$5"]),
            &spans(&["300", "5"]),
            Currency::Usd,
        );
        assert_eq!(m.amount, 300.0);
        assert_eq!(m.currency, Currency::Jpy);
    }

    #[test]
    fn test_nothing_found() {
        let m = resolve_money(&[], &[], Currency::Usd);
        assert_eq!(m.amount, 0.0);
        assert_eq!(m.currency, Currency::Usd);

        let m = resolve_money(&[], &spans(&["lots"]), Currency::Usd);
        assert_eq!(m.amount, 0.0);
    }

    #[test]
    fn test_currency_for_marker() {
        assert_eq!(currency_for_marker("Dollars"), Some(Currency::Usd));
        assert_eq!(currency_for_marker("¥"), Some(Currency::Jpy));
        assert_eq!(currency_for_marker("euro"), None);
    }
}
