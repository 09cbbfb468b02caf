//! Literal and enum schemas

use sieve_value::{Literal, Value};

use crate::foundation::{Def, ErrorMessage, IssueKind, ParseContext, Schema, SchemaType};
use crate::macros::schema_handle;

pub(crate) fn parse(
    values: &[Literal],
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    if !values.iter().any(|literal| literal.matches(&input)) {
        let kind = IssueKind::InvalidValue {
            values: values.to_vec(),
        };
        ctx.report(kind, &input, err);
    }
    input
}

/// Accepts exactly `value`.
#[must_use]
pub fn literal(value: impl Into<Literal>) -> Schema {
    Schema::from_def(Def::Literal(vec![value.into()]))
}

/// Accepts any of `values`.
pub fn literals<I, L>(values: I) -> Schema
where
    I: IntoIterator<Item = L>,
    L: Into<Literal>,
{
    Schema::from_def(Def::Literal(values.into_iter().map(Into::into).collect()))
}

schema_handle! {
    /// A fixed set of string or number options.
    EnumSchema
}

impl EnumSchema {
    fn values(&self) -> &[Literal] {
        match self.as_schema().def() {
            Def::Enum(values) => values,
            _ => &[],
        }
    }

    /// Returns the options in declaration order.
    #[must_use]
    pub fn options(&self) -> Vec<Literal> {
        self.values().to_vec()
    }

    /// A new enum holding only `keep`. Unknown options are ignored.
    #[must_use]
    pub fn extract<I, L>(&self, keep: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        let keep: Vec<Literal> = keep.into_iter().map(Into::into).collect();
        let values = self
            .values()
            .iter()
            .filter(|v| keep.contains(v))
            .cloned()
            .collect::<Vec<_>>();
        enumeration(values)
    }

    /// A new enum without `drop`.
    #[must_use]
    pub fn exclude<I, L>(&self, drop: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        let drop: Vec<Literal> = drop.into_iter().map(Into::into).collect();
        let values = self
            .values()
            .iter()
            .filter(|v| !drop.contains(v))
            .cloned()
            .collect::<Vec<_>>();
        enumeration(values)
    }
}

/// Accepts any of `values`, reported as an enum.
///
/// ```rust,ignore
/// let env = enumeration(["production", "development"]);
/// ```
pub fn enumeration<I, L>(values: I) -> EnumSchema
where
    I: IntoIterator<Item = L>,
    L: Into<Literal>,
{
    EnumSchema::from_schema(Schema::from_def(Def::Enum(
        values.into_iter().map(Into::into).collect(),
    )))
}
