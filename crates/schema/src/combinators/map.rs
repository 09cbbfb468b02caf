//! Maps and sets
//!
//! Entries are evaluated in insertion order. Keys that can address a path
//! (strings, numbers, symbols) prefix their issues; other keys get their
//! issues wrapped in `invalid_key` / `invalid_element`.

use sieve_value::{PathSegment, Value};

use crate::foundation::checks::{Check, CheckKind};
use crate::foundation::{
    Def, ErrorMessage, Expected, Issue, IssueKind, Job, Limit, Origin, ParseContext, Schema,
    SchemaError, run_jobs,
};
use crate::macros::schema_handle;

fn prefix_all(issues: Vec<Issue>, segment: &PathSegment) -> Vec<Issue> {
    let prefix = std::slice::from_ref(segment);
    issues.into_iter().map(|issue| issue.prefixed(prefix)).collect()
}

pub(crate) async fn parse_map(
    key: &Schema,
    value: &Schema,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Result<Value, SchemaError> {
    let Value::Map(map) = &input else {
        ctx.report(IssueKind::invalid_type(Expected::Map, &input), &input, err);
        return Ok(input);
    };

    // Key and value jobs interleave so issues come back in entry order.
    let mut jobs = Vec::with_capacity(map.len() * 2);
    for (k, v) in map.iter() {
        jobs.push(Job::new(key, k.clone(), ctx.isolated()));
        jobs.push(Job::new(value, v.clone(), ctx.isolated()));
    }
    let mut results = run_jobs(jobs, ctx.concurrent()).await?.into_iter();

    let mut out = Vec::with_capacity(map.len());
    for (original_key, _) in map.iter() {
        let (Some((key_out, key_ctx)), Some((value_out, value_ctx))) =
            (results.next(), results.next())
        else {
            break;
        };
        let segment = PathSegment::from_key(original_key);
        let key_issues = key_ctx.into_issues();
        if !key_issues.is_empty() {
            match &segment {
                Some(segment) => ctx.extend_relative(prefix_all(key_issues, segment)),
                None => {
                    let kind = IssueKind::InvalidKey {
                        origin: Origin::Map,
                        issues: key_issues,
                    };
                    ctx.report(kind, &input, err);
                }
            }
        }
        let value_issues = value_ctx.into_issues();
        if !value_issues.is_empty() {
            match &segment {
                Some(segment) => ctx.extend_relative(prefix_all(value_issues, segment)),
                None => {
                    let kind = IssueKind::InvalidElement {
                        origin: Origin::Map,
                        key: original_key.clone(),
                        issues: value_issues,
                    };
                    ctx.report(kind, &input, err);
                }
            }
        }
        out.push((key_out, value_out));
    }
    Ok(Value::map(out))
}

pub(crate) async fn parse_set(
    element: &Schema,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Result<Value, SchemaError> {
    let Value::Set(set) = &input else {
        ctx.report(IssueKind::invalid_type(Expected::Set, &input), &input, err);
        return Ok(input);
    };
    let jobs = set
        .iter()
        .map(|item| Job::new(element, item.clone(), ctx.isolated()))
        .collect();
    let results = run_jobs(jobs, ctx.concurrent()).await?;
    let mut out = Vec::with_capacity(results.len());
    for (value, child) in results {
        // Set members have no address; their issues sit at the set itself.
        ctx.extend_relative(child.into_issues());
        out.push(value);
    }
    Ok(Value::set(out))
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

schema_handle! {
    /// A map schema with size builders.
    MapSchema
}

schema_handle! {
    /// A set schema with size builders.
    SetSchema
}

/// Accepts maps whose keys match `key` and values match `value`.
pub fn map(key: impl Into<Schema>, value: impl Into<Schema>) -> MapSchema {
    MapSchema(Schema::from_def(Def::Map {
        key: key.into(),
        value: value.into(),
    }))
}

/// Accepts sets whose members match `element`.
pub fn set(element: impl Into<Schema>) -> SetSchema {
    SetSchema(Schema::from_def(Def::Set(element.into())))
}

fn size_check(schema: &Schema, kind: CheckKind) -> Schema {
    schema.with_check(Check::plain(kind))
}

impl MapSchema {
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, n: usize) -> Self {
        Self(size_check(&self.0, CheckKind::Min {
            origin: Origin::Map,
            limit: Limit::Size(n),
            inclusive: true,
        }))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, n: usize) -> Self {
        Self(size_check(&self.0, CheckKind::Max {
            origin: Origin::Map,
            limit: Limit::Size(n),
            inclusive: true,
        }))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn size(&self, n: usize) -> Self {
        Self(size_check(&self.0, CheckKind::Length {
            origin: Origin::Map,
            exact: n,
        }))
    }
}

impl SetSchema {
    #[must_use = "builder methods must be chained or built"]
    pub fn min(&self, n: usize) -> Self {
        Self(size_check(&self.0, CheckKind::Min {
            origin: Origin::Set,
            limit: Limit::Size(n),
            inclusive: true,
        }))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(&self, n: usize) -> Self {
        Self(size_check(&self.0, CheckKind::Max {
            origin: Origin::Set,
            limit: Limit::Size(n),
            inclusive: true,
        }))
    }

    /// Exactly `n` members.
    #[must_use = "builder methods must be chained or built"]
    pub fn size(&self, n: usize) -> Self {
        Self(size_check(&self.0, CheckKind::Length {
            origin: Origin::Set,
            exact: n,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn string_keys_prefix_paths() {
        let s = map(string(), number());
        let input = Value::map([
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from("x")),
        ]);
        let err = s.parse(input).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].dot_path(), "b");
    }

    #[test]
    fn unaddressable_keys_wrap_issues() {
        let s = map(string(), number());
        let input = Value::map([(Value::Null, Value::from("x"))]);
        let err = s.parse(input).unwrap_err();
        let codes: Vec<_> = err.issues().iter().map(|i| i.code()).collect();
        assert_eq!(codes, vec!["invalid_key", "invalid_element"]);
        assert_eq!(err.issues()[0].message, "Invalid key in map");
        let IssueKind::InvalidElement { key, .. } = &err.issues()[1].kind else {
            panic!("expected invalid_element");
        };
        assert_eq!(*key, Value::Null);
    }

    #[test]
    fn map_size_bounds() {
        let s = map(string(), number()).max(1);
        let input = Value::map([
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), Value::from(2)),
        ]);
        let err = s.parse(input).unwrap_err();
        assert_eq!(err.issues()[0].message, "Too big: expected map to have <=1 items");
    }

    #[test]
    fn set_members_report_at_the_set() {
        let s = set(number());
        let err = s
            .parse(Value::set([Value::from(1), Value::from("x")]))
            .unwrap_err();
        assert_eq!(err.issues()[0].path, Vec::<PathSegment>::new());
    }

    #[test]
    fn set_size() {
        let s = set(string()).min(2);
        let err = s.parse(Value::set([Value::from("a")])).unwrap_err();
        assert_eq!(err.issues()[0].message, "Too small: expected set to have >=2 items");
        assert!(set(string())
            .size(1)
            .safe_parse(Value::set([Value::from("a")]))
            .unwrap()
            .is_success());
    }

    #[test]
    fn rejects_other_containers() {
        let err = set(string()).parse(Value::array([])).unwrap_err();
        assert_eq!(err.issues()[0].message, "Invalid input: expected set, received array");
    }
}
