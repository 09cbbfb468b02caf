//! Prelude module for convenient imports.
//!
//! `use sieve_schema::prelude::*;` brings in the schema trait, every
//! constructor, the result types and the value model.
//!
//! ```rust,ignore
//! use sieve_schema::prelude::*;
//!
//! let tags = string().min(1).array().max(10);
//! let point = tuple([number(), number()]);
//! ```

// ============================================================================
// FOUNDATION: Schema handle, issues, errors
// ============================================================================

pub use crate::foundation::{
    Format, Io, Issue, IssueKind, Origin, ParseError, Params, RefinementCtx, RefinementIssue,
    Schema, SchemaError, SchemaType, ValidationError,
};
pub use crate::parse::ParseResult;

// ============================================================================
// VALIDATORS: Leaf schemas
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Composite schemas and wrappers
// ============================================================================

pub use crate::combinators::{
    ArraySchema, CatchContext, DiscriminatedUnionSchema, MapSchema, ObjectSchema, SetSchema, array,
    discriminated_union, intersection, lazy, loose_object, map, partial_record, preprocess, record,
    recursive, set, strict_object, transform, tuple, tuple_with_rest, union,
};
/// The `object` constructor and the `object!` macro.
pub use crate::object;

// ============================================================================
// CONFIG, METADATA, EXPORT
// ============================================================================

pub use crate::config::{Config, ParseOptions};
pub use crate::json_schema::{JsonSchemaOptions, to_json_schema};
pub use crate::registry::Meta;

// ============================================================================
// VALUES
// ============================================================================

pub use sieve_value::{Literal, PathSegment, Value, ValueKind};
