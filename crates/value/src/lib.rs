//! # sieve-value
//!
//! The dynamic value model validated by `sieve-schema`.
//!
//! A [`Value`] is any untyped input a schema can be asked to check: the
//! JSON-like scalars, plus the categories a JSON document cannot express
//! (`undefined`, `bigint`, dates, symbols, maps and sets).
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve_value::{Value, ValueKind};
//! use serde_json::json;
//!
//! let v = Value::from(json!({"name": "alice", "tags": ["a", "b"]}));
//! assert_eq!(v.kind(), ValueKind::Object);
//! assert_eq!(v.get("name"), Some(&Value::from("alice")));
//! ```
//!
//! ## Freezing
//!
//! Containers can be frozen. Every mutating method on a frozen container
//! returns [`ValueError::Frozen`] instead of changing it.

mod collections;
mod error;
mod kind;
mod literal;
mod path;
mod serde_impl;
mod symbol;
mod value;

pub use collections::{Array, Map, Object, Set};
pub use error::{ValueError, ValueResult};
pub use kind::ValueKind;
pub use literal::Literal;
pub use path::{MAX_INDEX, PathSegment, format_path};
pub use symbol::Symbol;
pub use value::{Value, format_number};

/// Common imports for working with values.
pub mod prelude {
    pub use crate::{
        Array, Literal, Map, Object, PathSegment, Set, Symbol, Value, ValueError, ValueKind,
    };
}
