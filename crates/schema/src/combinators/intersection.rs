//! Intersections
//!
//! Both sides parse the same input; their outputs are merged structurally.
//! Outputs that cannot be merged are a schema error, not an issue.

use sieve_value::{PathSegment, Value};

use crate::foundation::{Def, Job, ParseContext, Schema, SchemaError, run_jobs};

pub(crate) async fn parse(
    left: &Schema,
    right: &Schema,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    let mark = ctx.mark();
    let jobs = vec![
        Job::new(left, input.clone(), ctx.child(None)),
        Job::new(right, input.clone(), ctx.child(None)),
    ];
    let mut results = run_jobs(jobs, ctx.concurrent()).await?.into_iter();
    let (Some((a, left_ctx)), Some((b, right_ctx))) = (results.next(), results.next()) else {
        return Ok(input);
    };
    ctx.merge(left_ctx);
    ctx.merge(right_ctx);
    if ctx.aborted_since(mark) {
        return Ok(input);
    }
    let mut path = Vec::new();
    match merge_values(a, b, &mut path) {
        Some(merged) => Ok(merged),
        None => Err(SchemaError::UnmergeableIntersection { path }),
    }
}

/// Merges two outputs. On conflict returns `None`, leaving `path` at the
/// conflicting location.
pub(crate) fn merge_values(a: Value, b: Value, path: &mut Vec<PathSegment>) -> Option<Value> {
    if a == b {
        return Some(a);
    }
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            let mut out: Vec<(String, Value)> = Vec::with_capacity(a.len() + b.len());
            for (key, left) in a.iter() {
                match b.get(key) {
                    Some(right) => {
                        path.push(PathSegment::from(key.as_str()));
                        let merged = merge_values(left.clone(), right.clone(), path)?;
                        path.pop();
                        out.push((key.clone(), merged));
                    }
                    None => out.push((key.clone(), left.clone())),
                }
            }
            for (key, right) in b.iter() {
                if !a.contains_key(key) {
                    out.push((key.clone(), right.clone()));
                }
            }
            Some(Value::Object(out.into_iter().collect()))
        }
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => {
            let mut out = Vec::with_capacity(a.len());
            for (i, (left, right)) in a.into_vec().into_iter().zip(b.into_vec()).enumerate() {
                path.push(PathSegment::Index(i));
                out.push(merge_values(left, right, path)?);
                path.pop();
            }
            Some(Value::array(out))
        }
        _ => None,
    }
}

/// Accepts values matching both `left` and `right`.
///
/// ```rust,ignore
/// let named_and_aged = intersection(
///     object([("name", string())]),
///     object([("age", number())]),
/// );
/// ```
pub fn intersection(left: impl Into<Schema>, right: impl Into<Schema>) -> Schema {
    Schema::from_def(Def::Intersection(left.into(), right.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::object;
    use crate::foundation::SchemaType;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn merges_object_outputs() {
        let s = intersection(object([("a", string())]), object([("b", number())]));
        let out = s
            .parse(Value::object([("a", Value::from("x")), ("b", Value::from(1))]))
            .unwrap();
        assert_eq!(out, Value::object([("a", Value::from("x")), ("b", Value::from(1))]));
    }

    #[test]
    fn collects_issues_from_both_sides() {
        let s = intersection(object([("a", string())]), object([("b", number())]));
        let err = s.parse(Value::object::<&str, _>([])).unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.dot_path()).collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn conflicting_outputs_are_a_schema_error() {
        let s = intersection(
            string().transform(|_, _| Value::from("left")),
            string().transform(|_, _| Value::from("right")),
        );
        let err = s.safe_parse("x").unwrap_err();
        assert_eq!(err, SchemaError::UnmergeableIntersection { path: vec![] });
    }

    #[test]
    fn conflict_path_points_at_the_key() {
        let mut path = Vec::new();
        let a = Value::object([("n", Value::object([("x", Value::from(1))]))]);
        let b = Value::object([("n", Value::object([("x", Value::from(2))]))]);
        assert!(merge_values(a, b, &mut path).is_none());
        assert_eq!(sieve_value::format_path(&path), "n.x");
    }

    #[test]
    fn arrays_merge_elementwise() {
        let mut path = Vec::new();
        let a = Value::array([Value::object([("a", Value::from(1))])]);
        let b = Value::array([Value::object([("b", Value::from(2))])]);
        let merged = merge_values(a, b, &mut path).unwrap();
        assert_eq!(
            merged,
            Value::array([Value::object([("a", Value::from(1)), ("b", Value::from(2))])])
        );
    }
}
