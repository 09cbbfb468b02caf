//! Composite schemas built from other schemas.

pub(crate) mod intersection;
pub(crate) mod lazy;
pub(crate) mod map;
pub(crate) mod modifiers;
pub(crate) mod object;
pub(crate) mod pipe;
pub(crate) mod record;
pub(crate) mod sequence;
pub(crate) mod union;

pub use intersection::intersection;
pub use lazy::{lazy, recursive};
pub use map::{MapSchema, SetSchema, map, set};
pub use modifiers::CatchContext;
pub use object::{ObjectSchema, loose_object, object, strict_object};
pub use pipe::{preprocess, transform};
pub use record::{partial_record, record};
pub use sequence::{ArraySchema, array, tuple, tuple_with_rest};
pub use union::{DiscriminatedUnionSchema, discriminated_union, union};
