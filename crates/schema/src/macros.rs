//! Macros for building schemas with less boilerplate.
//!
//! - [`object!`] builds an object schema from `key => schema` pairs.

// ============================================================================
// OBJECT MACRO
// ============================================================================

/// Builds an [`ObjectSchema`](crate::ObjectSchema) from `key => schema`
/// pairs, in declaration order.
///
/// ```rust,ignore
/// use sieve_schema::prelude::*;
///
/// let user = object! {
///     "name" => string().min(1),
///     "age" => number().int().optional(),
/// };
/// ```
#[macro_export]
macro_rules! object {
    ($($key:expr => $schema:expr),* $(,)?) => {
        $crate::object([$(($key, $crate::Schema::from($schema))),*])
    };
}

// ============================================================================
// TYPED HANDLES
// ============================================================================

/// Declares a typed handle around [`Schema`](crate::Schema): the newtype,
/// its [`SchemaType`](crate::SchemaType) impl and the conversion back into
/// a plain schema.
macro_rules! schema_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(pub(crate) $crate::foundation::Schema);

        impl $crate::foundation::SchemaType for $name {
            fn as_schema(&self) -> &$crate::foundation::Schema {
                &self.0
            }

            fn from_schema(schema: $crate::foundation::Schema) -> Self {
                Self(schema)
            }
        }

        impl From<$name> for $crate::foundation::Schema {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };
}

pub(crate) use schema_handle;
