//! Value kinds.
//!
//! `ValueKind` is the lightweight classification of a [`Value`](crate::Value).
//! Its display form is the wording used for "received ..." in validation
//! messages, so `NaN` is its own kind even though it is stored as a number.

use std::fmt;

/// The runtime category of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ValueKind {
    #[serde(rename = "undefined")]
    Undefined,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "NaN")]
    NaN,
    #[serde(rename = "bigint")]
    BigInt,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "symbol")]
    Symbol,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "set")]
    Set,
}

impl ValueKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::NaN => "NaN",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Date => "date",
            Self::Symbol => "symbol",
            Self::Array => "array",
            Self::Object => "object",
            Self::Map => "map",
            Self::Set => "set",
        }
    }

    /// Returns true for kinds that hold other values.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object | Self::Map | Self::Set)
    }

    /// Returns true for kinds that may be used as object property keys
    /// (and therefore as issue path segments).
    #[must_use]
    pub const fn is_property_key(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Symbol)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
