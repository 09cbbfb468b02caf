//! Hashable primitive literals.
//!
//! Literal and enum schemas, and the discriminator index of discriminated
//! unions, need to compare and hash primitive values. `f64` is neither `Eq`
//! nor `Hash`, so numbers are compared by their normalised bit pattern:
//! every NaN is the same literal and `-0` equals `+0`.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::value::{Value, format_number};

/// A primitive value usable as a literal, enum option or discriminator.
#[derive(Debug, Clone)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
}

impl Literal {
    /// Converts the literal back into a [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Undefined => Value::Undefined,
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(*n),
            Self::BigInt(n) => Value::BigInt(*n),
            Self::String(s) => Value::String(s.clone()),
        }
    }

    /// Returns true if `value` is this literal.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        value.to_literal().is_some_and(|literal| &literal == self)
    }

    /// Returns the string payload of a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    fn number_bits(n: f64) -> u64 {
        if n.is_nan() {
            f64::NAN.to_bits()
        } else if n == 0.0 {
            0.0_f64.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Number(n) => Self::number_bits(*n).hash(state),
            Self::BigInt(n) => n.hash(state),
            Self::String(s) => s.hash(state),
        }
    }
}

/// Renders the literal the way it appears in messages: strings are JSON
/// quoted and bigints carry an `n` suffix.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i128> for Literal {
    fn from(value: i128) -> Self {
        Self::BigInt(value)
    }
}

impl serde::Serialize for Literal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numbers_are_normalised() {
        assert_eq!(Literal::Number(f64::NAN), Literal::Number(f64::NAN));
        assert_eq!(Literal::Number(-0.0), Literal::Number(0.0));

        let set: HashSet<Literal> = [Literal::Number(-0.0), Literal::Number(0.0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn kinds_never_collide() {
        assert_ne!(Literal::from("1"), Literal::from(1));
        assert_ne!(Literal::Undefined, Literal::Null);
        assert_ne!(Literal::Number(1.0), Literal::BigInt(1));
    }

    #[test]
    fn display_matches_message_wording() {
        assert_eq!(Literal::from("a").to_string(), "\"a\"");
        assert_eq!(Literal::BigInt(5).to_string(), "5n");
        assert_eq!(Literal::from(2.5).to_string(), "2.5");
        assert_eq!(Literal::Null.to_string(), "null");
    }

    #[test]
    fn matches_value() {
        assert!(Literal::from("x").matches(&Value::from("x")));
        assert!(!Literal::from("x").matches(&Value::from("y")));
        assert!(!Literal::from(1).matches(&Value::Null));
    }
}
