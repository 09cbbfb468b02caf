//! Arrays and tuples

use sieve_value::{PathSegment, Value};

use crate::foundation::checks::{Check, CheckKind};
use crate::foundation::{
    Def, ErrorMessage, Expected, IssueKind, Job, Limit, Origin, ParseContext, Schema, SchemaError,
    run_jobs,
};
use crate::macros::schema_handle;

pub(crate) async fn parse_array(
    element: &Schema,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Result<Value, SchemaError> {
    let Value::Array(items) = &input else {
        ctx.report(IssueKind::invalid_type(Expected::Array, &input), &input, err);
        return Ok(input);
    };
    // Holes are stored as `undefined` and checked like any other element.
    let jobs = items
        .iter()
        .enumerate()
        .map(|(i, item)| Job::new(element, item.clone(), ctx.child(Some(PathSegment::Index(i)))))
        .collect();
    let results = run_jobs(jobs, ctx.concurrent()).await?;
    let mut out = Vec::with_capacity(results.len());
    for (value, child) in results {
        ctx.merge(child);
        out.push(value);
    }
    Ok(Value::array(out))
}

/// Number of leading items a tuple input must provide: everything up to
/// and including the last item that does not accept `undefined`.
fn required_len(items: &[Schema]) -> usize {
    items
        .iter()
        .rposition(|item| !item.optin())
        .map_or(0, |last| last + 1)
}

pub(crate) async fn parse_tuple(
    items: &[Schema],
    rest: Option<&Schema>,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Result<Value, SchemaError> {
    let Value::Array(values) = &input else {
        ctx.report(IssueKind::invalid_type(Expected::Tuple, &input), &input, err);
        return Ok(input);
    };
    let len = values.len();
    let required = required_len(items);
    if rest.is_none() && len > items.len() {
        let kind = IssueKind::TooBig {
            origin: Origin::Array,
            maximum: Limit::Size(items.len()),
            inclusive: true,
            exact: false,
        };
        ctx.report(kind, &input, err);
        return Ok(input);
    }
    if len < required {
        let kind = IssueKind::TooSmall {
            origin: Origin::Array,
            minimum: Limit::Size(required),
            inclusive: true,
            exact: false,
        };
        ctx.report(kind, &input, err);
        return Ok(input);
    }

    let mut jobs = Vec::with_capacity(len.max(items.len()));
    for (i, item) in items.iter().enumerate() {
        if i >= len {
            break;
        }
        let value = values.get(i).cloned().unwrap_or_default();
        jobs.push(Job::new(item, value, ctx.child(Some(PathSegment::Index(i)))));
    }
    if let Some(rest) = rest {
        for (i, value) in values.iter().enumerate().skip(items.len()) {
            jobs.push(Job::new(rest, value.clone(), ctx.child(Some(PathSegment::Index(i)))));
        }
    }
    let results = run_jobs(jobs, ctx.concurrent()).await?;
    let mut out = Vec::with_capacity(results.len());
    for (value, child) in results {
        ctx.merge(child);
        out.push(value);
    }
    Ok(Value::array(out))
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

schema_handle! {
    /// An array schema with length builders.
    ArraySchema
}

/// Accepts arrays whose every element matches `element`.
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema(Schema::from_def(Def::Array(element.into())))
}

/// Accepts fixed-length arrays, one schema per position. Trailing
/// positions that accept `undefined` may be omitted.
pub fn tuple<I, S>(items: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Schema::from_def(Def::Tuple {
        items: items.into_iter().map(Into::into).collect(),
        rest: None,
    })
}

/// Like [`tuple`], with any number of trailing elements matching `rest`.
pub fn tuple_with_rest<I, S>(items: I, rest: impl Into<Schema>) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Schema::from_def(Def::Tuple {
        items: items.into_iter().map(Into::into).collect(),
        rest: Some(rest.into()),
    })
}

impl ArraySchema {
    fn check(&self, kind: CheckKind) -> Self {
        Self(self.0.with_check(Check::plain(kind)))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, n: usize) -> Self {
        self.check(CheckKind::Min {
            origin: Origin::Array,
            limit: Limit::Size(n),
            inclusive: true,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, n: usize) -> Self {
        self.check(CheckKind::Max {
            origin: Origin::Array,
            limit: Limit::Size(n),
            inclusive: true,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn length(&self, n: usize) -> Self {
        self.check(CheckKind::Length {
            origin: Origin::Array,
            exact: n,
        })
    }

    /// At least one element.
    #[must_use = "builder methods must be chained or built"]
    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    /// Returns the element schema.
    #[must_use]
    pub fn element(&self) -> Schema {
        match self.0.def() {
            Def::Array(element) => element.clone(),
            _ => Schema::from_def(Def::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn array_too_small() {
        let err = array(string()).min(2).max(2).parse(Value::array([Value::from("a")])).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(
            serde_json::to_value(&err.issues()[0]).unwrap(),
            json!({
                "code": "too_small",
                "origin": "array",
                "minimum": 2,
                "inclusive": true,
                "path": [],
                "message": "Too small: expected array to have >=2 items",
            })
        );
    }

    #[test]
    fn element_issues_carry_indices() {
        let err = array(number())
            .parse(Value::array([Value::from(1), Value::from("x"), Value::Undefined]))
            .unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.dot_path()).collect();
        assert_eq!(paths, vec!["[1]", "[2]"]);
    }

    #[test]
    fn element_accessor() {
        let a = string().array();
        assert_eq!(a.element().kind(), "string");
    }

    #[test]
    fn tuple_positions_and_rest() {
        let t = tuple_with_rest([Schema::from(string()), Schema::from(number())], string());
        assert!(t
            .safe_parse(Value::array([Value::from("a"), Value::from(1), Value::from("b")]))
            .unwrap()
            .is_success());
        let err = t
            .parse(Value::array([Value::from("a"), Value::from(1), Value::from(2)]))
            .unwrap_err();
        assert_eq!(err.issues()[0].dot_path(), "[2]");
    }

    #[test]
    fn tuple_length_bounds() {
        let t = tuple([string(), string()]);
        let err = t
            .parse(Value::array([Value::from("a"), Value::from("b"), Value::from("c")]))
            .unwrap_err();
        assert_eq!(err.issues()[0].message, "Too big: expected array to have <=2 items");
        let err = t.parse(Value::array([Value::from("a")])).unwrap_err();
        assert_eq!(err.issues()[0].code(), "too_small");
    }

    #[test]
    fn tuple_optional_tail_may_be_omitted() {
        let t = tuple([Schema::from(string()), string().optional()]);
        let out = t.parse(Value::array([Value::from("a")])).unwrap();
        assert_eq!(out, Value::array([Value::from("a")]));
    }

    #[test]
    fn required_item_after_optional_one() {
        let t = tuple([string().optional(), Schema::from(string())]);
        assert!(t
            .safe_parse(Value::array([Value::Undefined, Value::from("b")]))
            .unwrap()
            .is_success());
        assert!(!t.safe_parse(Value::array([Value::from("a")])).unwrap().is_success());
    }
}
