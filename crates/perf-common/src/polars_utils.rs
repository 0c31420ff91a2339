//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including string conversions and numeric coercion.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, properly formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use perf_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(4021)), "4021");
/// assert_eq!(any_to_string(AnyValue::String("E-17")), "E-17");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Boolean(b) => if b { "1" } else { "0" }.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use perf_common::format_numeric;
///
/// assert_eq!(format_numeric(245.0), "245");
/// assert_eq!(format_numeric(61.5), "61.5");
/// assert_eq!(format_numeric(0.25), "0.25");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    // Strip unnecessary trailing zeros while keeping the integer part intact
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Coerces an `AnyValue` to `f64`.
///
/// Strings are parsed after trimming; anything that is null, non-numeric or
/// unparsable yields `None`. Booleans count as 0/1 so flag columns stored as
/// `true`/`false` still contribute to a composite score.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_to_f64_coerces_numeric_and_strings() {
        assert_eq!(any_to_f64(AnyValue::Int64(3)), Some(3.0));
        assert_eq!(any_to_f64(AnyValue::Float64(2.5)), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String(" 7 ")), Some(7.0));
        assert_eq!(any_to_f64(AnyValue::Boolean(true)), Some(1.0));
        assert_eq!(any_to_f64(AnyValue::String("n/a")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn parse_f64_rejects_blank() {
        assert_eq!(parse_f64("   "), None);
        assert_eq!(parse_f64("-1.25"), Some(-1.25));
    }

    #[test]
    fn format_numeric_keeps_integers() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-3.0), "-3");
        assert_eq!(format_numeric(1e21), "1000000000000000000000");
    }
}
