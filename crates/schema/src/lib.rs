//! # sieve-schema
//!
//! Composable runtime schemas for [`sieve_value::Value`]: validation,
//! coercion, transforms and JSON Schema export.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sieve_schema::prelude::*;
//!
//! let user = object! {
//!     "name" => string().min(1),
//!     "email" => string().email(),
//!     "age" => number().int().nonnegative().optional(),
//! };
//!
//! match user.safe_parse(input)? {
//!     ParseResult::Success(value) => println!("{value:?}"),
//!     ParseResult::Failure(error) => eprintln!("{}", error.prettify()),
//! }
//! ```
//!
//! ## Layout
//!
//! - [`validators`]: leaf schemas (strings, numbers, literals, ...) and
//!   their checks, plus the [`coerce`](validators::coerce) variants.
//! - [`combinators`]: objects, arrays, tuples, unions, records, maps,
//!   intersections, wrappers, pipes and recursion.
//! - [`foundation`]: the schema handle, issues and errors.
//! - [`report`]: flatten, treeify and prettify a failure.
//! - [`registry`] and [`json_schema`]: metadata and export.
//! - [`config`]: per-parse options and the global error map.
//!
//! Every schema is an immutable, cheaply cloned handle; builder methods
//! return new schemas and never affect the one they were called on.

// Issue kinds carry their payload inline, which makes the error enums large.
#![allow(clippy::result_large_err)]

mod macros;

pub mod combinators;
pub mod config;
pub mod foundation;
pub mod json_schema;
pub mod locale;
mod parse;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod validators;

pub use combinators::{
    ArraySchema, CatchContext, DiscriminatedUnionSchema, MapSchema, ObjectSchema, SetSchema, array,
    discriminated_union, intersection, lazy, loose_object, map, object, partial_record, preprocess,
    record, recursive, set, strict_object, transform, tuple, tuple_with_rest, union,
};
pub use config::{Config, ParseOptions};
pub use foundation::{
    Issue, IssueKind, ParseError, RefinementCtx, Schema, SchemaError, SchemaType, ValidationError,
};
pub use json_schema::{JsonSchemaError, JsonSchemaOptions, to_json_schema};
pub use parse::ParseResult;
pub use registry::{Meta, Registry};
pub use report::{ErrorTree, FlattenedError};
pub use validators::{
    BigIntSchema, DateSchema, EnumSchema, NumberSchema, StringSchema, any, bigint, boolean, custom,
    date, enumeration, int, int32, literal, literals, nan, never, null, number, string, symbol,
    undefined, unknown, void,
};

pub use sieve_value::{Literal, PathSegment, Value, ValueKind};
