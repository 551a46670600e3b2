//! Display formatting shared by tables, detail cards and forms.
//!
//! Every helper here is total: bad input yields `None` (rendered as
//! [`NOT_AVAILABLE`] by the caller), never a panic.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::fmt::Write;

/// Placeholder shown for any missing or unusable value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Parse an RFC 3339 timestamp or a string starting with `YYYY-MM-DD`.
/// Example: "2024-03-15T14:02:26.123Z" and "2024-03-15" both give 2024-03-15
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Format a backend date with a chrono pattern such as `%d/%m/%Y`.
/// An unparseable date or an invalid pattern yields `None`.
pub fn format_date(raw: &str, pattern: &str) -> Option<String> {
    let date = parse_date(raw)?;
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// `YYYY-MM-DD` form used by `<input type="date">`.
pub fn iso_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Number or numeric string to a finite `f64`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return None;
            }
            t.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Whole numbers without a fraction, everything else as Rust prints it.
pub fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Scalar text of a JSON value: non-empty strings and numbers only.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(format_plain_number),
        _ => None,
    }
}

/// Format with a comma thousands separator and a fixed number of decimals.
/// Example: `format_number_with_decimals(1234567.891, 2)` gives "1,234,567.89"
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // -0.001 rounds to "0.00" and must not keep its sign
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match decimal_part {
        Some(d) => format!("{sign}{grouped}.{d}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Money with two decimals behind a currency symbol: "₪1,234.50".
pub fn format_money(value: f64, symbol: &str) -> String {
    format!("{}{}", symbol, format_number_with_decimals(value, 2))
}

/// Amount cell: `None` for null, missing, or non-numeric input.
pub fn format_currency(value: &Value, symbol: &str) -> Option<String> {
    coerce_number(value).map(|n| format_money(n, symbol))
}
