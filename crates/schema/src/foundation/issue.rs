//! Issue model
//!
//! An [`Issue`] is one validation failure. Issues are plain values: they
//! never reference the schema that produced them, and once pushed onto a
//! [`ParseContext`](crate::foundation::ParseContext) they are only read.
//!
//! The serialised form is wire stable: every issue carries `code`, `path`
//! and `message`, plus the fields specific to its code.
//!
//! ```rust,ignore
//! {
//!   "code": "too_small",
//!   "origin": "array",
//!   "minimum": 2,
//!   "inclusive": true,
//!   "path": [],
//!   "message": "Too small: expected array to have >=2 items"
//! }
//! ```

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use sieve_value::{Literal, PathSegment, Value, ValueKind, format_number, format_path};

// ============================================================================
// ISSUE PARAMETERS
// ============================================================================

/// The kind of value a bound applies to. Drives message wording
/// ("to have >=2 items" vs "to be >=2").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    String,
    Number,
    BigInt,
    Date,
    Array,
    Set,
    Map,
    Record,
}

impl Origin {
    /// Returns the lowercase name of the origin.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::Date => "date",
            Self::Array => "array",
            Self::Set => "set",
            Self::Map => "map",
            Self::Record => "record",
        }
    }

    /// Returns the unit for sized origins, `None` for ordered ones.
    #[must_use]
    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::String => Some("characters"),
            Self::Array | Self::Set | Self::Map => Some("items"),
            _ => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bound value in a `too_small`/`too_big`/`not_multiple_of` issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Limit {
    /// A length or size.
    Size(usize),
    Number(f64),
    BigInt(i128),
    Date(DateTime<Utc>),
}

impl Limit {
    /// Compares two limits of the same variant. Mixed variants are
    /// unordered.
    #[must_use]
    pub fn partial_cmp_same(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::Size(a), Self::Size(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::BigInt(a), Self::BigInt(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Returns the limit as a JSON number where it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Size(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            Self::BigInt(_) | Self::Date(_) => None,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(n) => write!(f, "{n}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Size(n) => serializer.serialize_u64(*n as u64),
            Self::Number(n) => Value::Number(*n).serialize(serializer),
            Self::BigInt(n) => serializer.serialize_str(&n.to_string()),
            Self::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

/// The type an `invalid_type` issue expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expected {
    String,
    Number,
    Int,
    BigInt,
    Boolean,
    Date,
    Symbol,
    Undefined,
    Null,
    Void,
    Never,
    Nan,
    Array,
    Object,
    Tuple,
    Record,
    Map,
    Set,
    /// Raised by `nonoptional` when the result is `undefined`.
    NonOptional,
}

impl Expected {
    /// Returns the lowercase name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Int => "int",
            Self::BigInt => "bigint",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Symbol => "symbol",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Void => "void",
            Self::Never => "never",
            Self::Nan => "nan",
            Self::Array => "array",
            Self::Object => "object",
            Self::Tuple => "tuple",
            Self::Record => "record",
            Self::Map => "map",
            Self::Set => "set",
            Self::NonOptional => "nonoptional",
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// String format tags carried by `invalid_format` issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Email,
    Url,
    Emoji,
    Uuid,
    Guid,
    Nanoid,
    Cuid,
    Cuid2,
    Ulid,
    Ipv4,
    Ipv6,
    Cidrv4,
    Cidrv6,
    Base64,
    Base64url,
    E164,
    Jwt,
    Datetime,
    Date,
    Time,
    Duration,
    Regex,
    StartsWith,
    EndsWith,
    Includes,
    Lowercase,
    Uppercase,
}

impl Format {
    /// Returns the wire tag of the format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::Emoji => "emoji",
            Self::Uuid => "uuid",
            Self::Guid => "guid",
            Self::Nanoid => "nanoid",
            Self::Cuid => "cuid",
            Self::Cuid2 => "cuid2",
            Self::Ulid => "ulid",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Cidrv4 => "cidrv4",
            Self::Cidrv6 => "cidrv6",
            Self::Base64 => "base64",
            Self::Base64url => "base64url",
            Self::E164 => "e164",
            Self::Jwt => "jwt",
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::Regex => "regex",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Includes => "includes",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
        }
    }

    /// Returns the JSON-Schema `format` keyword value, if one exists.
    #[must_use]
    pub const fn json_schema_format(self) -> Option<&'static str> {
        match self {
            Self::Email => Some("email"),
            Self::Url => Some("uri"),
            Self::Uuid | Self::Guid => Some("uuid"),
            Self::Ipv4 => Some("ipv4"),
            Self::Ipv6 => Some("ipv6"),
            Self::Datetime => Some("date-time"),
            Self::Date => Some("date"),
            Self::Time => Some("time"),
            Self::Duration => Some("duration"),
            Self::Emoji => Some("emoji"),
            Self::Nanoid => Some("nanoid"),
            Self::Cuid => Some("cuid"),
            Self::Cuid2 => Some("cuid2"),
            Self::Ulid => Some("ulid"),
            Self::Cidrv4 => Some("cidrv4"),
            Self::Cidrv6 => Some("cidrv6"),
            Self::E164 => Some("e164"),
            Self::Jwt => Some("jwt"),
            Self::Base64 | Self::Base64url => None,
            Self::Regex
            | Self::StartsWith
            | Self::EndsWith
            | Self::Includes
            | Self::Lowercase
            | Self::Uppercase => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

// ============================================================================
// ISSUE KIND
// ============================================================================

/// The taxonomy of validation failures, tagged by `code` on the wire.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    /// The value's runtime category does not match.
    InvalidType {
        expected: Expected,
        #[serde(skip)]
        received: ValueKind,
    },
    /// The value is not among an enumerated or literal set.
    InvalidValue { values: Vec<Literal> },
    TooSmall {
        origin: Origin,
        minimum: Limit,
        inclusive: bool,
        #[serde(skip_serializing_if = "is_false")]
        exact: bool,
    },
    TooBig {
        origin: Origin,
        maximum: Limit,
        inclusive: bool,
        #[serde(skip_serializing_if = "is_false")]
        exact: bool,
    },
    /// A string format or pattern mismatch.
    InvalidFormat {
        format: Format,
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        includes: Option<String>,
    },
    NotMultipleOf { divisor: Limit },
    /// Extra keys on a strict object or an exhaustive record.
    UnrecognizedKeys { keys: Vec<String> },
    /// No union member matched. `errors` holds each member's issues, with
    /// paths relative to the union.
    InvalidUnion {
        errors: Vec<Vec<Issue>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<Cow<'static, str>>,
    },
    /// A record or map key failed its key schema.
    InvalidKey { origin: Origin, issues: Vec<Issue> },
    /// A map entry whose key cannot address a path failed its value schema.
    InvalidElement {
        origin: Origin,
        key: Value,
        issues: Vec<Issue>,
    },
    /// Raised by refinements.
    Custom {
        #[serde(skip_serializing_if = "Option::is_none")]
        params: Option<serde_json::Value>,
    },
}

impl IssueKind {
    /// Returns the wire `code` of the issue.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidType { .. } => "invalid_type",
            Self::InvalidValue { .. } => "invalid_value",
            Self::TooSmall { .. } => "too_small",
            Self::TooBig { .. } => "too_big",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::NotMultipleOf { .. } => "not_multiple_of",
            Self::UnrecognizedKeys { .. } => "unrecognized_keys",
            Self::InvalidUnion { .. } => "invalid_union",
            Self::InvalidKey { .. } => "invalid_key",
            Self::InvalidElement { .. } => "invalid_element",
            Self::Custom { .. } => "custom",
        }
    }

    /// Shorthand for an `invalid_type` issue against `input`.
    #[must_use]
    pub fn invalid_type(expected: Expected, input: &Value) -> Self {
        Self::InvalidType {
            expected,
            received: input.kind(),
        }
    }

    /// Shorthand for an `invalid_format` issue without extra fields.
    #[must_use]
    pub fn invalid_format(format: Format, pattern: Option<String>) -> Self {
        Self::InvalidFormat {
            format,
            pattern,
            prefix: None,
            suffix: None,
            includes: None,
        }
    }

    /// Shorthand for a `custom` issue without params.
    #[must_use]
    pub fn custom() -> Self {
        Self::Custom { params: None }
    }
}

// ============================================================================
// ISSUE
// ============================================================================

/// One structured validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    #[serde(flatten)]
    pub kind: IssueKind,
    /// Location of the failure, from the root of the parsed value.
    pub path: Vec<PathSegment>,
    pub message: String,
    /// The offending value; only attached when the parse asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip)]
    pub(crate) continuable: bool,
}

impl Issue {
    /// Returns the wire `code` of the issue.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Renders the path in dotted notation.
    #[must_use]
    pub fn dot_path(&self) -> String {
        format_path(&self.path)
    }

    /// Returns true if later checks on the same node may still run after
    /// this issue.
    #[must_use]
    pub fn is_continuable(&self) -> bool {
        self.continuable
    }

    /// Returns a copy with `prefix` prepended to the path.
    #[must_use]
    pub(crate) fn prefixed(mut self, prefix: &[PathSegment]) -> Self {
        if !prefix.is_empty() {
            let mut path = prefix.to_vec();
            path.append(&mut self.path);
            self.path = path;
        }
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code(), self.message)
        } else {
            write!(f, "[{}] {}: {}", self.dot_path(), self.code(), self.message)
        }
    }
}

/// An issue before its message is resolved; what error maps receive.
#[derive(Debug, Clone, Copy)]
pub struct PendingIssue<'a> {
    pub kind: &'a IssueKind,
    pub path: &'a [PathSegment],
    pub input: &'a Value,
}

impl PendingIssue<'_> {
    /// Returns the wire `code` of the issue.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
