//! Leaf schemas: primitives, literals and enums, with their checks.

pub mod coerce;
pub(crate) mod formats;
pub mod iso;
pub(crate) mod literal;
pub(crate) mod primitive;

mod bigint;
mod date;
mod number;
mod string;

pub use bigint::{BigIntSchema, bigint};
pub use date::{DateSchema, date};
pub use formats::IsoOptions;
pub use literal::{EnumSchema, enumeration, literal, literals};
pub use number::{NumberSchema, int, int32, number};
pub use primitive::{any, boolean, custom, nan, never, null, symbol, undefined, unknown, void};
pub use string::{StringSchema, string};
