//! Loosely typed numbers coming from the course API.
//!
//! Decimal columns (`price`, `rating`, `progress_percentage`) arrive either as
//! JSON numbers or as numeric strings such as `"4.50"`, and sometimes not at
//! all. Everything that does arithmetic on them goes through [`coerce_or_zero`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Longest numeric prefix, the same part `parseFloat` would read.
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("leading number regex")
});

/// A number the API may send as a JSON number, a numeric string, or garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    Other(Value),
}

impl LooseNumber {
    /// Numeric reading of the value, `None` when nothing numeric is there.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n).filter(|v| v.is_finite()),
            LooseNumber::Text(text) => parse_leading_f64(text),
            LooseNumber::Other(_) => None,
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber::Number(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        LooseNumber::Text(value.to_string())
    }
}

/// Parse the leading numeric part of `text`, skipping leading whitespace.
/// Non-finite results are rejected.
pub fn parse_leading_f64(text: &str) -> Option<f64> {
    let found = LEADING_NUMBER_RE.find(text.trim_start())?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Safe coercion with the default of `0`.
pub fn coerce_or_zero(value: Option<&LooseNumber>) -> f64 {
    value.and_then(LooseNumber::as_f64).unwrap_or(0.0)
}

/// Same coercion applied to a raw JSON value.
pub fn coerce_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_leading_f64(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Price label with two decimals, `"$0.00"` when the price is missing.
pub fn format_price(value: Option<&LooseNumber>) -> String {
    format!("${:.2}", coerce_or_zero(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_leading_f64() {
        assert_eq!(parse_leading_f64("4.50"), Some(4.5));
        assert_eq!(parse_leading_f64("  3"), Some(3.0));
        assert_eq!(parse_leading_f64("3.5 stars"), Some(3.5));
        assert_eq!(parse_leading_f64(".5"), Some(0.5));
        assert_eq!(parse_leading_f64("-2e2"), Some(-200.0));
        assert_eq!(parse_leading_f64("abc"), None);
        assert_eq!(parse_leading_f64(""), None);
    }

    #[test]
    fn test_coerce_or_zero() {
        assert_eq!(coerce_or_zero(Some(&LooseNumber::from("3"))), 3.0);
        assert_eq!(coerce_or_zero(Some(&LooseNumber::from(5.0))), 5.0);
        assert_eq!(coerce_or_zero(Some(&LooseNumber::from("n/a"))), 0.0);
        assert_eq!(coerce_or_zero(Some(&LooseNumber::Other(json!(true)))), 0.0);
        assert_eq!(coerce_or_zero(None), 0.0);
    }

    #[test]
    fn test_deserialize_loose_number() {
        let n: LooseNumber = serde_json::from_value(json!("12.00")).unwrap();
        assert_eq!(n, LooseNumber::Text("12.00".to_string()));
        let n: LooseNumber = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(n.as_f64(), Some(7.0));
        let n: Option<LooseNumber> = serde_json::from_value(json!(null)).unwrap();
        assert!(n.is_none());
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value(&json!("2.25")), 2.25);
        assert_eq!(coerce_value(&json!(4)), 4.0);
        assert_eq!(coerce_value(&json!(null)), 0.0);
        assert_eq!(coerce_value(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(&LooseNumber::from("19.9"))), "$19.90");
        assert_eq!(format_price(None), "$0.00");
    }
}
