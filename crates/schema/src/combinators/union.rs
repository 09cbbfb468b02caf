//! Unions and discriminated unions
//!
//! A plain union tries its options and takes the first clean success. A
//! discriminated union reads one key and dispatches through an index built
//! when the schema is constructed, so at most one option is evaluated.

use std::collections::HashMap;

use sieve_value::{Literal, PathSegment, Value};

use crate::foundation::{
    Def, ErrorMessage, Expected, Issue, IssueKind, Job, ParseContext, Schema, SchemaError,
    run_jobs,
};
use crate::macros::schema_handle;

/// Note attached when no option is registered for the discriminator.
pub(crate) const NO_MATCHING_DISCRIMINATOR: &str = "No matching discriminator";

// ============================================================================
// UNION
// ============================================================================

#[derive(Clone)]
pub(crate) struct UnionDef {
    pub(crate) options: Vec<Schema>,
}

impl UnionDef {
    pub(crate) async fn parse(
        &self,
        input: Value,
        ctx: &mut ParseContext,
        err: Option<&ErrorMessage>,
    ) -> Result<Value, SchemaError> {
        parse_options(&self.options, input, ctx, err).await
    }
}

/// One option's outcome, with issues relative to the union.
struct Attempt {
    value: Value,
    issues: Vec<Issue>,
}

impl Attempt {
    fn aborted(&self) -> bool {
        self.issues.iter().any(|issue| !issue.is_continuable())
    }
}

async fn parse_options(
    options: &[Schema],
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Result<Value, SchemaError> {
    let mut attempts = Vec::with_capacity(options.len());
    if ctx.concurrent() {
        let jobs = options
            .iter()
            .map(|option| Job::new(option, input.clone(), ctx.isolated()))
            .collect();
        for (value, child) in run_jobs(jobs, true).await? {
            attempts.push(Attempt {
                value,
                issues: child.into_issues(),
            });
        }
    } else {
        for option in options {
            let mut child = ctx.isolated();
            let value = option.run(input.clone(), &mut child).await?;
            let clean = child.issues().is_empty();
            attempts.push(Attempt {
                value,
                issues: child.into_issues(),
            });
            if clean {
                break;
            }
        }
    }

    if let Some(index) = attempts.iter().position(|a| a.issues.is_empty()) {
        return Ok(attempts.swap_remove(index).value);
    }

    // A single option that got past its structural check wins outright:
    // its issues are more useful than a union of every failure.
    let mut viable = attempts.iter().enumerate().filter(|(_, a)| !a.aborted());
    if let (Some((index, _)), None) = (viable.next(), viable.next()) {
        let attempt = attempts.swap_remove(index);
        ctx.extend_relative(attempt.issues);
        return Ok(attempt.value);
    }

    let errors = attempts.into_iter().map(|a| a.issues).collect();
    let kind = IssueKind::InvalidUnion { errors, note: None };
    ctx.report(kind, &input, err);
    Ok(input)
}

/// Accepts a value matching any of `options`.
///
/// ```rust,ignore
/// let id = union([string().uuid().into(), int().into()]);
/// ```
pub fn union<I, S>(options: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Schema::from_def(Def::Union(UnionDef {
        options: options.into_iter().map(Into::into).collect(),
    }))
}

// ============================================================================
// DISCRIMINATED UNION
// ============================================================================

#[derive(Clone)]
pub(crate) struct DiscriminatedDef {
    pub(crate) discriminator: String,
    pub(crate) options: Vec<Schema>,
    /// Discriminator value to option index.
    pub(crate) index: HashMap<Literal, usize>,
    /// Try every option when the discriminator is not registered.
    pub(crate) union_fallback: bool,
}

impl DiscriminatedDef {
    fn build(discriminator: String, options: Vec<Schema>) -> Result<Self, SchemaError> {
        let mut index = HashMap::new();
        for (i, option) in options.iter().enumerate() {
            let values = discriminator_values(option, &discriminator).map_err(|reason| {
                SchemaError::InvalidDiscriminatedUnion { index: i, reason }
            })?;
            for value in values {
                if index.insert(value.clone(), i).is_some() {
                    return Err(SchemaError::DuplicateDiscriminator {
                        discriminator,
                        value: value.to_string(),
                    });
                }
            }
        }
        tracing::debug!(
            discriminator = %discriminator,
            options = options.len(),
            entries = index.len(),
            "built discriminator index"
        );
        Ok(Self {
            discriminator,
            options,
            index,
            union_fallback: false,
        })
    }

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
        let tag = object
            .get(&self.discriminator)
            .and_then(Value::to_literal)
            .unwrap_or(Literal::Undefined);
        if let Some(&i) = self.index.get(&tag) {
            return self.options[i].run(input, ctx).await;
        }
        if self.union_fallback {
            return parse_options(&self.options, input, ctx, err).await;
        }
        let kind = IssueKind::InvalidUnion {
            errors: Vec::new(),
            note: Some(NO_MATCHING_DISCRIMINATOR.into()),
        };
        let at = [PathSegment::from(self.discriminator.as_str())];
        ctx.push(kind, &input, err, &at, false);
        Ok(input)
    }
}

/// Values an option accepts for `key`, looking through wrappers that keep
/// the object shape.
fn discriminator_values(option: &Schema, key: &str) -> Result<Vec<Literal>, String> {
    match option.def() {
        Def::Object(def) => match def.shape.get(key) {
            Some(field) => {
                let values = literal_values(field)?;
                if values.is_empty() {
                    Err(format!("discriminator key {key:?} accepts no values"))
                } else {
                    Ok(values)
                }
            }
            None => Err(format!("missing discriminator key {key:?}")),
        },
        Def::DiscriminatedUnion(def) if def.discriminator == key => {
            Ok(def.index.keys().cloned().collect())
        }
        Def::Pipe { input, .. } => discriminator_values(input, key),
        Def::Brand(inner) | Def::Readonly(inner) | Def::Catch { inner, .. } => {
            discriminator_values(inner, key)
        }
        Def::Lazy(lazy) => match lazy.resolve() {
            Some(inner) => discriminator_values(&inner, key),
            None => Err("recursive option is detached".to_owned()),
        },
        other => Err(format!("option of kind {} is not an object", other.name())),
    }
}

/// The finite set of primitives `field` accepts, looking through wrappers
/// and unions whose options are all finite.
pub(crate) fn literal_values(field: &Schema) -> Result<Vec<Literal>, String> {
    match field.def() {
        Def::Literal(values) | Def::Enum(values) => Ok(values.clone()),
        Def::Undefined => Ok(vec![Literal::Undefined]),
        Def::Null => Ok(vec![Literal::Null]),
        Def::Optional(inner) => {
            let mut values = literal_values(inner)?;
            values.push(Literal::Undefined);
            Ok(values)
        }
        Def::Nullable(inner) => {
            let mut values = literal_values(inner)?;
            values.push(Literal::Null);
            Ok(values)
        }
        Def::Brand(inner)
        | Def::Readonly(inner)
        | Def::Default { inner, .. }
        | Def::Prefault { inner, .. }
        | Def::Catch { inner, .. }
        | Def::Pipe { input: inner, .. } => literal_values(inner),
        Def::Lazy(lazy) => match lazy.resolve() {
            Some(inner) => literal_values(&inner),
            None => Err("recursive discriminator is detached".to_owned()),
        },
        Def::Union(def) => {
            let mut values = Vec::new();
            for option in &def.options {
                for value in literal_values(option)? {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
            }
            Ok(values)
        }
        other => Err(format!(
            "discriminator must be a literal or enum, found {}",
            other.name()
        )),
    }
}

schema_handle! {
    /// A union dispatched on one key.
    DiscriminatedUnionSchema
}

/// Builds a union that dispatches on `discriminator`.
///
/// Fails if an option is not object-shaped, lacks the key, does not pin
/// it to literal values, or shares a value with another option.
///
/// ```rust,ignore
/// let shape = discriminated_union("type", [
///     object([("type", literal("a")), ("a", string().into())]),
///     object([("type", literal("b")), ("b", string().into())]),
/// ])?;
/// ```
pub fn discriminated_union<I, S>(
    discriminator: impl Into<String>,
    options: I,
) -> Result<DiscriminatedUnionSchema, SchemaError>
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    let options = options.into_iter().map(Into::into).collect();
    let def = DiscriminatedDef::build(discriminator.into(), options)?;
    Ok(DiscriminatedUnionSchema(Schema::from_def(
        Def::DiscriminatedUnion(def),
    )))
}

impl DiscriminatedUnionSchema {
    fn def(&self) -> Option<&DiscriminatedDef> {
        match self.0.def() {
            Def::DiscriminatedUnion(def) => Some(def),
            _ => None,
        }
    }

    /// On an unknown discriminator, try every option and report each
    /// option's issues instead of a single note.
    #[must_use = "builder methods must be chained or built"]
    pub fn union_fallback(&self) -> Self {
        Self(self.0.derive(|node| {
            if let Def::DiscriminatedUnion(def) = &mut node.def {
                def.union_fallback = true;
            }
        }))
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        self.def().map_or("", |def| def.discriminator.as_str())
    }

    #[must_use]
    pub fn options(&self) -> Vec<Schema> {
        self.def().map(|def| def.options.clone()).unwrap_or_default()
    }
}
