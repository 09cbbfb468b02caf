//! The dynamic `Value` enum

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::collections::{Array, Map, Object, Set};
use crate::kind::ValueKind;
use crate::literal::Literal;
use crate::symbol::Symbol;

/// Any input a schema can validate.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// An absent value. Also used for array holes and missing properties.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    /// A double; NaN and the infinities are representable.
    Number(f64),
    BigInt(i128),
    String(String),
    Date(DateTime<Utc>),
    Symbol(Symbol),
    Array(Array),
    Object(Object),
    Map(Map),
    Set(Set),
}

/// Renders a number the way messages show it: `NaN`, `Infinity`,
/// `-Infinity`, integral values without a fraction.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        format!("{n}")
    }
}

impl Value {
    // ==================== Constructors ====================

    /// Builds an object from key/value pairs.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(pairs.into_iter().collect())
    }

    /// Builds an array from values.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Builds a map from key/value pairs.
    pub fn map<I: IntoIterator<Item = (Value, Value)>>(pairs: I) -> Self {
        Self::Map(pairs.into_iter().collect())
    }

    /// Builds a set from values. Duplicates are dropped.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Set(items.into_iter().collect())
    }

    // ==================== Classification ====================

    /// Returns the runtime category of the value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(n) if n.is_nan() => ValueKind::NaN,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Map(_) => ValueKind::Map,
            Self::Set(_) => ValueKind::Set,
        }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value as a literal if it is a literal-able primitive.
    #[must_use]
    pub fn to_literal(&self) -> Option<Literal> {
        match self {
            Self::Undefined => Some(Literal::Undefined),
            Self::Null => Some(Literal::Null),
            Self::Bool(b) => Some(Literal::Bool(*b)),
            Self::Number(n) => Some(Literal::Number(*n)),
            Self::BigInt(n) => Some(Literal::BigInt(*n)),
            Self::String(s) => Some(Literal::String(s.clone())),
            _ => None,
        }
    }

    // ==================== Accessors ====================

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bigint(&self) -> Option<i128> {
        match self {
            Self::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up an object property. Returns `None` for non-objects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Looks up an array element. Returns `None` for non-arrays.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|a| a.get(index))
    }

    // ==================== Freezing ====================

    /// Freezes the top-level container. Nested containers are untouched and
    /// primitives are unaffected.
    #[must_use]
    pub fn freeze(mut self) -> Self {
        match &mut self {
            Self::Array(a) => a.freeze(),
            Self::Object(o) => o.freeze(),
            Self::Map(m) => m.freeze(),
            Self::Set(s) => s.freeze(),
            _ => {}
        }
        self
    }

    /// Returns true if the value is a frozen container. Primitives are
    /// immutable and report true.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Array(a) => a.is_frozen(),
            Self::Object(o) => o.is_frozen(),
            Self::Map(m) => m.is_frozen(),
            Self::Set(s) => s.is_frozen(),
            _ => true,
        }
    }

    /// SameValueZero equality: NaN equals NaN, `+0` equals `-0`, symbols
    /// compare by identity and containers by structure.
    #[must_use]
    pub fn same_value_zero(&self, other: &Value) -> bool {
        self == other
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            _ => false,
        }
    }
}

// ==================== Conversions ====================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Self::BigInt(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        value.to_value()
    }
}

impl From<&Literal> for Value {
    fn from(value: &Literal) -> Self {
        value.to_value()
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(Array::from(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Self::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<Set> for Value {
    fn from(value: Set) -> Self {
        Self::Set(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

// ==================== Display ====================

/// JS-like rendering: strings quoted inside containers, bare at the top.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            other => write_nested(other, f),
        }
    }
}

fn write_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::BigInt(n) => write!(f, "{n}n"),
        Value::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
        Value::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Symbol(s) => write!(f, "{s}"),
        Value::Array(a) => {
            f.write_str("[")?;
            for (i, item) in a.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_nested(item, f)?;
            }
            f.write_str("]")
        }
        Value::Object(o) => {
            if o.is_empty() {
                return f.write_str("{}");
            }
            f.write_str("{ ")?;
            for (i, (k, v)) in o.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{k}: ")?;
                write_nested(v, f)?;
            }
            f.write_str(" }")
        }
        Value::Map(m) => {
            write!(f, "Map({}) {{", m.len())?;
            for (i, (k, v)) in m.iter().enumerate() {
                f.write_str(if i > 0 { ", " } else { " " })?;
                write_nested(k, f)?;
                f.write_str(" => ")?;
                write_nested(v, f)?;
            }
            f.write_str(if m.is_empty() { "}" } else { " }" })
        }
        Value::Set(s) => {
            write!(f, "Set({}) {{", s.len())?;
            for (i, item) in s.iter().enumerate() {
                f.write_str(if i > 0 { ", " } else { " " })?;
                write_nested(item, f)?;
            }
            f.write_str(if s.is_empty() { "}" } else { " }" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, "NaN")]
    #[case(f64::INFINITY, "Infinity")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    #[case(5.0, "5")]
    #[case(-0.0, "0")]
    #[case(2.5, "2.5")]
    fn numbers_render_like_messages(#[case] n: f64, #[case] expected: &str) {
        assert_eq!(format_number(n), expected);
    }

    #[test]
    fn nan_equals_nan() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Number(-0.0), Value::Number(0.0));
        assert_ne!(Value::Number(1.0), Value::BigInt(1));
    }

    #[test]
    fn freeze_is_shallow() {
        let inner = Value::object([("b", Value::from(1))]);
        let outer = Value::object([("a", inner)]).freeze();
        assert!(outer.is_frozen());
        assert!(!outer.get("a").unwrap().is_frozen());
    }

    #[test]
    fn display_is_js_like() {
        let v = Value::object([
            ("name", Value::from("x")),
            ("tags", Value::array([Value::from(1), Value::BigInt(2)])),
        ]);
        assert_eq!(v.to_string(), r#"{ name: "x", tags: [1, 2n] }"#);
        assert_eq!(Value::from("bare").to_string(), "bare");
        assert_eq!(
            Value::map([(Value::from("k"), Value::Null)]).to_string(),
            r#"Map(1) { "k" => null }"#
        );
    }

    #[test]
    fn option_converts_to_undefined() {
        assert_eq!(Value::from(None::<i32>), Value::Undefined);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
