//! Issue path segments

use std::fmt;

use crate::symbol::Symbol;
use crate::value::{Value, format_number};

/// One step of a path into a value: an object key, an array index, or a
/// symbol key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key access: `.key`
    Key(String),
    /// Array index access: `[index]`
    Index(usize),
    /// Symbol-keyed access
    Symbol(Symbol),
}

/// Largest map key rendered as an index segment.
pub const MAX_INDEX: usize = u32::MAX as usize;

impl PathSegment {
    /// Builds a path segment from a map key.
    ///
    /// Only strings, numbers and symbols can address an entry; every other
    /// key kind returns `None`. Non-negative integers up to
    /// [`MAX_INDEX`] become indices; other numbers keep their rendered form
    /// as a key.
    #[must_use]
    pub fn from_key(key: &Value) -> Option<Self> {
        match key {
            Value::String(s) => Some(Self::Key(s.clone())),
            Value::Number(n) if n.fract() == 0.0 && (0.0..=MAX_INDEX as f64).contains(n) => {
                Some(Self::Index(*n as usize))
            }
            Value::Number(n) => Some(Self::Key(format_number(*n))),
            Value::Symbol(sym) => Some(Self::Symbol(sym.clone())),
            _ => None,
        }
    }

    /// Returns the key if this is a key segment.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            _ => None,
        }
    }

    /// Returns the index if this is an index segment.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
            Self::Symbol(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl serde::Serialize for PathSegment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(k) => serializer.serialize_str(k),
            Self::Index(i) => serializer.serialize_u64(*i as u64),
            Self::Symbol(s) => serializer.serialize_str(&s.to_string()),
        }
    }
}

fn is_identifier(key: &str) -> bool {
    key.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Renders a path in dotted notation: `a.b[0].c`.
///
/// Keys that are not plain identifiers are rendered in JSON-quoted bracket
/// form (`["user.name"]`), as are symbol keys.
#[must_use]
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for (position, segment) in path.iter().enumerate() {
        match segment {
            PathSegment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
            PathSegment::Symbol(sym) => {
                out.push('[');
                out.push_str(&serde_json::Value::String(sym.to_string()).to_string());
                out.push(']');
            }
            PathSegment::Key(key) if !is_identifier(key) => {
                out.push('[');
                out.push_str(&serde_json::Value::String(key.clone()).to_string());
                out.push(']');
            }
            PathSegment::Key(key) => {
                if position > 0 {
                    out.push('.');
                }
                out.push_str(key);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(k: &str) -> PathSegment {
        PathSegment::from(k)
    }

    #[rstest]
    #[case(vec![key("a"), key("b"), PathSegment::Index(0), key("c")], "a.b[0].c")]
    #[case(vec![key("user.name"), key("first.last")], r#"["user.name"]["first.last"]"#)]
    #[case(vec![key("user"), key("$special")], "user.$special")]
    #[case(vec![key("search"), key("foo\nbar")], r#"search["foo\nbar"]"#)]
    #[case(vec![key("items"), PathSegment::Index(0), PathSegment::Index(1)], "items[0][1]")]
    #[case(vec![key("data[0]"), key("value")], r#"["data[0]"].value"#)]
    #[case(vec![key(""), key("empty")], ".empty")]
    #[case(vec![], "")]
    fn dotted_paths(#[case] path: Vec<PathSegment>, #[case] expected: &str) {
        assert_eq!(format_path(&path), expected);
    }

    #[test]
    fn symbol_segments_are_quoted() {
        let path = vec![key("a"), PathSegment::Symbol(Symbol::new("b"))];
        assert_eq!(format_path(&path), r#"a["Symbol(b)"]"#);
    }

    #[test]
    fn map_keys_become_segments() {
        assert_eq!(
            PathSegment::from_key(&Value::Number(42.0)),
            Some(PathSegment::Index(42))
        );
        assert_eq!(
            PathSegment::from_key(&Value::from("k")),
            Some(PathSegment::Key("k".into()))
        );
        assert_eq!(PathSegment::from_key(&Value::Bool(true)), None);
    }

    #[rstest]
    #[case(1e15)]
    #[case(1e20)]
    #[case(MAX_INDEX as f64 + 1.0)]
    fn huge_numeric_keys_stay_keys(#[case] n: f64) {
        assert_eq!(
            PathSegment::from_key(&Value::Number(n)),
            Some(PathSegment::Key(format_number(n)))
        );
    }

    #[test]
    fn largest_index_key() {
        assert_eq!(
            PathSegment::from_key(&Value::Number(MAX_INDEX as f64)),
            Some(PathSegment::Index(MAX_INDEX))
        );
    }
}
