//! Object schemas
//!
//! Output keys follow the declared shape order, then any extra keys the
//! unknown-key policy keeps, in input order.

use indexmap::IndexMap;
use sieve_value::{PathSegment, Value};

use crate::foundation::{
    Def, ErrorMessage, Expected, IssueKind, Job, ParseContext, Schema, SchemaError, SchemaType,
    run_jobs,
};
use crate::macros::schema_handle;
use crate::validators::{EnumSchema, enumeration};

/// Keys that are never copied from input onto an output object.
const POLLUTING_KEYS: &[&str] = &["__proto__"];

/// What happens to input keys missing from the shape.
#[derive(Clone, Default)]
pub(crate) enum UnknownKeys {
    #[default]
    Strip,
    Strict,
    Passthrough,
    Catchall(Schema),
}

#[derive(Clone, Default)]
pub(crate) struct ObjectDef {
    pub(crate) shape: IndexMap<String, Schema>,
    pub(crate) unknown: UnknownKeys,
}

impl ObjectDef {
    pub(crate) async fn parse(
        &self,
        input: Value,
        ctx: &mut ParseContext,
        err: Option<&ErrorMessage>,
    ) -> Result<Value, SchemaError> {
        let Value::Object(object) = &input else {
            ctx.report(IssueKind::invalid_type(Expected::Object, &input), &input, err);
            return Ok(input);
        };

        let jobs = self
            .shape
            .iter()
            .map(|(key, schema)| {
                let value = object.get(key).cloned().unwrap_or_default();
                Job::new(schema, value, ctx.child(Some(PathSegment::from(key.as_str()))))
            })
            .collect();
        let results = run_jobs(jobs, ctx.concurrent()).await?;

        let mut out: Vec<(String, Value)> = Vec::with_capacity(object.len());
        for ((key, schema), (value, child)) in self.shape.iter().zip(results) {
            let present = object.contains_key(key);
            if !present && schema.optout() && !child.issues().is_empty() {
                continue;
            }
            ctx.merge(child);
            if present || !value.is_undefined() {
                out.push((key.clone(), value));
            }
        }

        let extras: Vec<(&String, &Value)> = object
            .iter()
            .filter(|(key, _)| !self.shape.contains_key(key.as_str()))
            .collect();
        match &self.unknown {
            UnknownKeys::Strip => {}
            UnknownKeys::Strict => {
                if !extras.is_empty() {
                    let keys = extras.iter().map(|(key, _)| (*key).clone()).collect();
                    ctx.report(IssueKind::UnrecognizedKeys { keys }, &input, err);
                }
            }
            UnknownKeys::Passthrough => {
                out.extend(
                    extras
                        .into_iter()
                        .filter(|(key, _)| !POLLUTING_KEYS.contains(&key.as_str()))
                        .map(|(key, value)| (key.clone(), value.clone())),
                );
            }
            UnknownKeys::Catchall(schema) => {
                let kept: Vec<(&String, &Value)> = extras
                    .into_iter()
                    .filter(|(key, _)| !POLLUTING_KEYS.contains(&key.as_str()))
                    .collect();
                let jobs = kept
                    .iter()
                    .map(|(key, value)| {
                        let segment = PathSegment::from(key.as_str());
                        Job::new(schema, (*value).clone(), ctx.child(Some(segment)))
                    })
                    .collect();
                let results = run_jobs(jobs, ctx.concurrent()).await?;
                for ((key, _), (value, child)) in kept.into_iter().zip(results) {
                    ctx.merge(child);
                    out.push((key.clone(), value));
                }
            }
        }

        Ok(Value::Object(out.into_iter().collect()))
    }
}

// ============================================================================
// OBJECT SCHEMA
// ============================================================================

schema_handle! {
    /// An object schema with shape helpers.
    ///
    /// Helpers that change the shape (`extend`, `pick`, `partial`, ...)
    /// build a fresh node: refinements attached to the original are not
    /// carried over.
    ObjectSchema
}

/// Accepts objects matching `shape`; unknown keys are stripped.
///
/// ```rust,ignore
/// let user = object([("name", string().into()), ("age", number().optional())]);
/// ```
pub fn object<I, K, S>(shape: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema::build(collect_shape(shape), UnknownKeys::Strip)
}

/// Like [`object`], but unknown keys are an `unrecognized_keys` issue.
pub fn strict_object<I, K, S>(shape: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema::build(collect_shape(shape), UnknownKeys::Strict)
}

/// Like [`object`], but unknown keys pass through unchanged.
pub fn loose_object<I, K, S>(shape: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    ObjectSchema::build(collect_shape(shape), UnknownKeys::Passthrough)
}

fn collect_shape<I, K, S>(shape: I) -> IndexMap<String, Schema>
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Schema>,
{
    shape
        .into_iter()
        .map(|(key, schema)| (key.into(), schema.into()))
        .collect()
}

impl ObjectSchema {
    fn build(shape: IndexMap<String, Schema>, unknown: UnknownKeys) -> Self {
        Self(Schema::from_def(Def::Object(ObjectDef { shape, unknown })))
    }

    fn def(&self) -> ObjectDef {
        match self.0.def() {
            Def::Object(def) => def.clone(),
            _ => ObjectDef::default(),
        }
    }

    fn with_shape(&self, f: impl FnOnce(&mut IndexMap<String, Schema>)) -> Self {
        let mut def = self.def();
        f(&mut def.shape);
        Self::build(def.shape, def.unknown)
    }

    fn with_unknown(&self, unknown: UnknownKeys) -> Self {
        Self(self.0.derive(|node| {
            if let Def::Object(def) = &mut node.def {
                def.unknown = unknown;
            }
        }))
    }

    /// Returns the declared shape.
    #[must_use]
    pub fn shape(&self) -> IndexMap<String, Schema> {
        self.def().shape
    }

    // ==================== Unknown keys ====================

    /// Reports unknown keys as `unrecognized_keys`.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(&self) -> Self {
        self.with_unknown(UnknownKeys::Strict)
    }

    /// Drops unknown keys. This is the default.
    #[must_use = "builder methods must be chained or built"]
    pub fn strip(&self) -> Self {
        self.with_unknown(UnknownKeys::Strip)
    }

    /// Keeps unknown keys unchanged.
    #[must_use = "builder methods must be chained or built"]
    pub fn passthrough(&self) -> Self {
        self.with_unknown(UnknownKeys::Passthrough)
    }

    /// Validates unknown keys against `schema`.
    #[must_use = "builder methods must be chained or built"]
    pub fn catchall(&self, schema: impl Into<Schema>) -> Self {
        self.with_unknown(UnknownKeys::Catchall(schema.into()))
    }

    // ==================== Shape helpers ====================

    /// Adds or replaces fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn extend<I, K, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        let fields = collect_shape(fields);
        self.with_shape(|shape| shape.extend(fields))
    }

    /// Adds `other`'s fields, which win on conflicts, and adopts its
    /// unknown-key policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn merge(&self, other: &ObjectSchema) -> Self {
        let other = other.def();
        let mut def = self.def();
        def.shape.extend(other.shape);
        Self::build(def.shape, other.unknown)
    }

    /// Keeps only `keys`. Unknown names are ignored.
    #[must_use = "builder methods must be chained or built"]
    pub fn pick<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        self.with_shape(|shape| {
            shape.retain(|name, _| keys.iter().any(|k| k.as_ref() == name.as_str()));
        })
    }

    /// Drops `keys`.
    #[must_use = "builder methods must be chained or built"]
    pub fn omit<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        self.with_shape(|shape| {
            shape.retain(|name, _| !keys.iter().any(|k| k.as_ref() == name.as_str()));
        })
    }

    /// Makes every field optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn partial(&self) -> Self {
        self.with_shape(|shape| {
            for schema in shape.values_mut() {
                *schema = schema.optional();
            }
        })
    }

    /// Makes every field required: `undefined` outputs are rejected.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(&self) -> Self {
        self.with_shape(|shape| {
            for schema in shape.values_mut() {
                *schema = schema.nonoptional();
            }
        })
    }

    /// An enum of the declared keys.
    #[must_use]
    pub fn keyof(&self) -> EnumSchema {
        enumeration(self.def().shape.into_keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;
    use sieve_value::Literal;

    fn user() -> ObjectSchema {
        object([
            ("name", Schema::from(string())),
            ("age", number().optional()),
        ])
    }

    #[test]
    fn strips_unknown_keys_and_keeps_declared_order() {
        let out = user()
            .parse(Value::object([("extra", Value::from(1)), ("name", Value::from("x"))]))
            .unwrap();
        assert_eq!(out, Value::object([("name", Value::from("x"))]));
    }

    #[test]
    fn absent_optional_key_stays_absent() {
        let out = user().parse(Value::object([("name", Value::from("x"))])).unwrap();
        assert!(out.as_object().is_some_and(|o| !o.contains_key("age")));
        let out = user()
            .parse(Value::object([("name", Value::from("x")), ("age", Value::Undefined)]))
            .unwrap();
        assert!(out.as_object().is_some_and(|o| o.contains_key("age")));
    }

    #[test]
    fn missing_required_key_reports_undefined() {
        let err = user().parse(Value::object::<&str, _>([])).unwrap_err();
        assert_eq!(err.issues()[0].dot_path(), "name");
        assert_eq!(err.issues()[0].message, "Invalid input: expected string, received undefined");
    }

    #[test]
    fn strict_lists_every_extra_key() {
        let err = user()
            .strict()
            .parse(Value::object([
                ("name", Value::from("x")),
                ("z", Value::from(1)),
                ("y", Value::from(2)),
            ]))
            .unwrap_err();
        assert_eq!(
            err.issues()[0].kind,
            IssueKind::UnrecognizedKeys {
                keys: vec!["z".into(), "y".into()]
            }
        );
    }

    #[test]
    fn passthrough_keeps_extras_but_not_proto() {
        let out = user()
            .passthrough()
            .parse(Value::object([
                ("name", Value::from("x")),
                ("z", Value::from(1)),
                ("__proto__", Value::object([("admin", Value::from(true))])),
            ]))
            .unwrap();
        assert_eq!(
            out,
            Value::object([("name", Value::from("x")), ("z", Value::from(1))])
        );
    }

    #[test]
    fn catchall_validates_extras() {
        let s = user().catchall(number());
        let err = s
            .parse(Value::object([("name", Value::from("x")), ("z", Value::from("no"))]))
            .unwrap_err();
        assert_eq!(err.issues()[0].dot_path(), "z");
    }

    #[test]
    fn shape_helpers() {
        let u = user();
        assert_eq!(u.pick(["name"]).shape().len(), 1);
        assert_eq!(u.omit(["name"]).shape().keys().collect::<Vec<_>>(), vec!["age"]);
        let extended = u.extend([("email", string().email())]);
        assert_eq!(extended.shape().len(), 3);
        let partial = u.partial();
        assert!(partial.safe_parse(Value::object::<&str, _>([])).unwrap().is_success());
        let required = u.required();
        assert!(!required
            .safe_parse(Value::object([("name", Value::from("x"))]))
            .unwrap()
            .is_success());
        assert_eq!(
            u.keyof().options(),
            vec![Literal::from("name"), Literal::from("age")]
        );
    }

    #[test]
    fn merge_takes_other_fields_and_policy() {
        let other = object([("name", number())]).strict();
        let merged = user().merge(&other);
        assert!(merged
            .safe_parse(Value::object([("name", Value::from(1))]))
            .unwrap()
            .is_success());
        assert!(!merged
            .safe_parse(Value::object([("name", Value::from(1)), ("q", Value::Null)]))
            .unwrap()
            .is_success());
    }

    #[test]
    fn rejects_non_objects() {
        let err = user().parse(Value::array([])).unwrap_err();
        assert_eq!(err.issues()[0].message, "Invalid input: expected object, received array");
    }
}
