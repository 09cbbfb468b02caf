//! JSON Schema export
//!
//! Projects a schema graph into a JSON Schema document. Shared and
//! recursive nodes are extracted into `$defs` (or `definitions` for
//! draft-07) and referenced with `$ref`; a cycle back to the root becomes
//! `{"$ref": "#"}`.
//!
//! ```rust,ignore
//! use sieve_schema::json_schema::{JsonSchemaOptions, to_json_schema};
//!
//! let doc = to_json_schema(&object([("name", string())]), &JsonSchemaOptions::default())?;
//! assert_eq!(doc["properties"]["name"]["type"], "string");
//! ```

mod generator;
mod options;

pub use options::{JsonSchemaOptions, OverrideFn, Reused, Target, Unrepresentable};

use serde_json::{Map, Value as Json};

use crate::foundation::SchemaType;
use crate::registry::Registry;
use generator::Generator;

/// Why a schema could not be projected.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonSchemaError {
    /// The node kind has no JSON Schema equivalent.
    #[error("{kind} cannot be represented in JSON Schema")]
    Unrepresentable { kind: &'static str },

    /// A `catch_with` fallback depends on the failure and has no static
    /// default.
    #[error("dynamic catch values cannot be represented in JSON Schema")]
    DynamicCatch,

    /// No schema is registered under the requested id.
    #[error("no schema registered under id {id:?}")]
    UnknownId { id: String },
}

impl JsonSchemaError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unrepresentable { .. } => "JSON_SCHEMA_UNREPRESENTABLE",
            Self::DynamicCatch => "JSON_SCHEMA_DYNAMIC_CATCH",
            Self::UnknownId { .. } => "JSON_SCHEMA_UNKNOWN_ID",
        }
    }
}

/// Projects `schema` into a standalone JSON Schema document.
pub fn to_json_schema<S: SchemaType>(
    schema: &S,
    options: &JsonSchemaOptions<'_>,
) -> Result<Json, JsonSchemaError> {
    Generator::new(options, false).document(schema.as_schema())
}

/// Projects the schema registered under `id` in `registry`. Other
/// registered schemas it references are kept as `$ref`s to their ids.
pub fn to_json_schema_for_id(
    registry: &Registry,
    id: &str,
    options: &JsonSchemaOptions<'_>,
) -> Result<Json, JsonSchemaError> {
    let schema = registry
        .schema_by_id(id)
        .ok_or_else(|| JsonSchemaError::UnknownId { id: id.to_owned() })?;
    let options = options.clone().with_registry(registry);
    Generator::new(&options, true).document(&schema)
}

/// Projects every schema in `registry` that has an `id`, as
/// `{"schemas": {id: document}}`. Schemas reference each other by id.
pub fn registry_to_json_schema(
    registry: &Registry,
    options: &JsonSchemaOptions<'_>,
) -> Result<Json, JsonSchemaError> {
    let mut schemas = Map::new();
    for (schema, meta) in registry.entries() {
        let Some(id) = meta.id else { continue };
        let options = options.clone().with_registry(registry);
        let doc = Generator::new(&options, true).document(&schema)?;
        schemas.insert(id, doc);
    }
    let mut out = Map::new();
    out.insert("schemas".to_owned(), Json::Object(schemas));
    Ok(Json::Object(out))
}
