//! Input coercion for `coerce::*` schemas
//!
//! Loose conversions: numbers from numeric text, booleans by truthiness,
//! dates from RFC 3339 text or epoch milliseconds. A value that cannot be
//! converted is returned unchanged so the structural check reports it.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sieve_value::Value;

use crate::validators::{BigIntSchema, DateSchema, NumberSchema, StringSchema};

pub(crate) fn to_string(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        Value::Symbol(_) => value,
        Value::BigInt(n) => Value::String(n.to_string()),
        other => Value::String(other.to_string()),
    }
}

fn parse_number_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    // `f64::from_str` also accepts "inf" and "nan".
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub(crate) fn to_number(value: Value) -> Value {
    let n = match &value {
        Value::Number(_) => return value,
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::BigInt(n) => *n as f64,
        Value::String(s) => parse_number_text(s),
        Value::Date(d) => d.timestamp_millis() as f64,
        Value::Array(a) if a.is_empty() => 0.0,
        Value::Array(a) if a.len() == 1 => match to_number(a.as_slice()[0].clone()) {
            Value::Number(n) => n,
            _ => f64::NAN,
        },
        Value::Symbol(_) => return value,
        _ => f64::NAN,
    };
    Value::Number(n)
}

pub(crate) fn to_boolean(value: Value) -> Value {
    let truthy = match &value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !(n.is_nan() || *n == 0.0),
        Value::BigInt(n) => *n != 0,
        Value::String(s) => !s.is_empty(),
        _ => true,
    };
    Value::Bool(truthy)
}

pub(crate) fn to_bigint(value: Value) -> Value {
    let converted = match &value {
        Value::BigInt(_) => return value,
        Value::Bool(b) => Some(i128::from(*b)),
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i128),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0)
            } else {
                trimmed.parse::<i128>().ok()
            }
        }
        _ => None,
    };
    converted.map_or(value, Value::BigInt)
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(d.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

pub(crate) fn to_date(value: Value) -> Value {
    let converted = match &value {
        Value::Date(_) => return value,
        Value::Number(n) if n.is_finite() => Utc.timestamp_millis_opt(*n as i64).single(),
        Value::String(s) => parse_date_text(s),
        _ => None,
    };
    converted.map_or(value, Value::Date)
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// A string schema that renders any non-string input as text.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema::with_coerce(true)
}

/// A number schema that parses numeric text and maps `null`/booleans to
/// numbers.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema::with_coerce(true)
}

/// A boolean schema that converts its input by truthiness.
#[must_use]
pub fn boolean() -> crate::foundation::Schema {
    crate::validators::primitive::boolean_with(true)
}

#[must_use]
pub fn bigint() -> BigIntSchema {
    BigIntSchema::with_coerce(true)
}

/// A date schema that accepts RFC 3339 strings and epoch milliseconds.
#[must_use]
pub fn date() -> DateSchema {
    DateSchema::with_coerce(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from("12"), 12.0)]
    #[case(Value::from(" 1.5 "), 1.5)]
    #[case(Value::from(""), 0.0)]
    #[case(Value::Null, 0.0)]
    #[case(Value::from(true), 1.0)]
    #[case(Value::from("0x1f"), 31.0)]
    fn numbers(#[case] input: Value, #[case] expected: f64) {
        assert_eq!(to_number(input), Value::Number(expected));
    }

    #[rstest]
    #[case(Value::from("abc"))]
    #[case(Value::from("inf"))]
    #[case(Value::Undefined)]
    fn not_numbers(#[case] input: Value) {
        assert!(to_number(input).as_f64().is_some_and(f64::is_nan));
    }

    #[test]
    fn truthiness() {
        assert_eq!(to_boolean(Value::from("")), Value::Bool(false));
        assert_eq!(to_boolean(Value::from("false")), Value::Bool(true));
        assert_eq!(to_boolean(Value::from(0)), Value::Bool(false));
        assert_eq!(to_boolean(Value::Number(f64::NAN)), Value::Bool(false));
    }

    #[test]
    fn bigints_and_dates() {
        assert_eq!(to_bigint(Value::from("42")), Value::BigInt(42));
        assert_eq!(to_bigint(Value::from(1.5)), Value::from(1.5));
        assert!(matches!(to_date(Value::from("2024-01-02")), Value::Date(_)));
        assert!(matches!(to_date(Value::from(0)), Value::Date(_)));
        assert_eq!(to_date(Value::from("nope")), Value::from("nope"));
    }

    #[test]
    fn strings() {
        assert_eq!(to_string(Value::from(12)), Value::from("12"));
        assert_eq!(to_string(Value::Null), Value::from("null"));
        assert_eq!(to_string(Value::from(true)), Value::from("true"));
    }
}
