//! Records: objects with uniformly typed keys and values

use sieve_value::{Literal, PathSegment, Value, format_number};

use crate::foundation::{
    Def, ErrorMessage, Expected, IssueKind, Job, Origin, ParseContext, Schema, SchemaError,
    run_jobs,
};

use super::union::literal_values;

#[derive(Clone)]
pub(crate) struct RecordDef {
    pub(crate) key: Schema,
    pub(crate) value: Schema,
    /// Skip the exhaustiveness check for enumerable key schemas.
    pub(crate) partial: bool,
}

/// Object keys a literal can stand for.
fn key_string(literal: &Literal) -> Option<String> {
    match literal {
        Literal::String(s) => Some(s.to_string()),
        Literal::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}

/// The fixed key set of a key schema built from literals, enums or unions
/// of them.
pub(crate) fn enumerable_keys(key: &Schema) -> Option<Vec<String>> {
    let values = literal_values(key).ok()?;
    let keys: Vec<String> = values.iter().filter_map(key_string).collect();
    (!keys.is_empty()).then_some(keys)
}

impl RecordDef {
    pub(crate) async fn parse(
        &self,
        input: Value,
        ctx: &mut ParseContext,
        err: Option<&ErrorMessage>,
    ) -> Result<Value, SchemaError> {
        let Value::Object(object) = &input else {
            ctx.report(IssueKind::invalid_type(Expected::Record, &input), &input, err);
            return Ok(input);
        };

        if let Some(keys) = enumerable_keys(&self.key).filter(|_| !self.partial) {
            let jobs = keys
                .iter()
                .map(|key| {
                    let value = object.get(key).cloned().unwrap_or_default();
                    Job::new(&self.value, value, ctx.child(Some(PathSegment::from(key.as_str()))))
                })
                .collect();
            let mut out = Vec::with_capacity(keys.len());
            for (key, (value, child)) in keys.iter().zip(run_jobs(jobs, ctx.concurrent()).await?) {
                ctx.merge(child);
                if object.contains_key(key) || !value.is_undefined() {
                    out.push((key.clone(), value));
                }
            }
            let extras: Vec<String> = object
                .keys()
                .filter(|key| !keys.iter().any(|k| k == key))
                .map(str::to_owned)
                .collect();
            if !extras.is_empty() {
                ctx.report(IssueKind::UnrecognizedKeys { keys: extras }, &input, err);
            }
            return Ok(Value::Object(out.into_iter().collect()));
        }

        let entries: Vec<(&String, &Value)> = object
            .iter()
            .filter(|(key, _)| key.as_str() != "__proto__")
            .collect();
        let key_jobs = entries
            .iter()
            .map(|(key, _)| Job::new(&self.key, Value::from(key.as_str()), ctx.isolated()))
            .collect();
        let key_results = run_jobs(key_jobs, ctx.concurrent()).await?;

        let mut accepted = Vec::with_capacity(entries.len());
        for ((key, value), (key_out, key_ctx)) in entries.into_iter().zip(key_results) {
            let segment = PathSegment::from(key.as_str());
            if !key_ctx.issues().is_empty() {
                let kind = IssueKind::InvalidKey {
                    origin: Origin::Record,
                    issues: key_ctx.into_issues(),
                };
                ctx.push(kind, &Value::from(key.as_str()), err, &[segment], false);
                continue;
            }
            // A key schema may transform the key; non-text outputs keep the
            // original key.
            let out_key = match &key_out {
                Value::String(s) => s.to_string(),
                Value::Number(n) => format_number(*n),
                _ => key.clone(),
            };
            accepted.push((out_key, value, segment));
        }

        let jobs = accepted
            .iter()
            .map(|(_, value, segment)| {
                Job::new(&self.value, (*value).clone(), ctx.child(Some(segment.clone())))
            })
            .collect();
        let results = run_jobs(jobs, ctx.concurrent()).await?;
        let mut out = Vec::with_capacity(results.len());
        for ((key, _, _), (value, child)) in accepted.into_iter().zip(results) {
            ctx.merge(child);
            out.push((key, value));
        }
        Ok(Value::Object(out.into_iter().collect()))
    }
}

/// Accepts objects whose keys match `key` and values match `value`.
///
/// With an enum or literal key schema the record is exhaustive: every
/// option must be present and other keys are rejected.
///
/// ```rust,ignore
/// let scores = record(string(), number());
/// ```
pub fn record(key: impl Into<Schema>, value: impl Into<Schema>) -> Schema {
    Schema::from_def(Def::Record(RecordDef {
        key: key.into(),
        value: value.into(),
        partial: false,
    }))
}

/// Like [`record`], but an enum key schema does not require every option.
pub fn partial_record(key: impl Into<Schema>, value: impl Into<Schema>) -> Schema {
    Schema::from_def(Def::Record(RecordDef {
        key: key.into(),
        value: value.into(),
        partial: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use crate::combinators::union;
    use crate::validators::{enumeration, literal, number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn validates_every_entry() {
        let s = record(string(), number());
        let input = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
        assert_eq!(s.parse(input.clone()).unwrap(), input);
        let err = s
            .parse(Value::object([("a", Value::from(1)), ("b", Value::from("x"))]))
            .unwrap_err();
        assert_eq!(err.issues()[0].dot_path(), "b");
    }

    #[test]
    fn key_failure_is_invalid_key() {
        let s = record(string().min(2), number());
        let err = s
            .parse(Value::object([("a", Value::from(1)), ("bb", Value::from(2))]))
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        let issue = &err.issues()[0];
        assert_eq!(issue.code(), "invalid_key");
        assert_eq!(issue.dot_path(), "a");
        assert_eq!(issue.message, "Invalid key in record");
        let IssueKind::InvalidKey { issues, .. } = &issue.kind else {
            panic!("expected invalid_key");
        };
        assert_eq!(issues[0].code(), "too_small");
    }

    #[test]
    fn enum_keys_are_exhaustive() {
        let s = record(enumeration(["a", "b"]), number());
        let err = s.parse(Value::object([("a", Value::from(1))])).unwrap_err();
        assert_eq!(err.issues()[0].dot_path(), "b");

        let err = s
            .parse(Value::object([
                ("a", Value::from(1)),
                ("b", Value::from(2)),
                ("c", Value::from(3)),
            ]))
            .unwrap_err();
        assert_eq!(
            err.issues()[0].kind,
            IssueKind::UnrecognizedKeys {
                keys: vec!["c".into()]
            }
        );
    }

    #[test]
    fn union_of_literal_keys_is_exhaustive() {
        let keys = union([literal("a"), enumeration(["b", "a"]).readonly()]);
        let s = record(keys, number());
        let err = s.parse(Value::object([("a", Value::from(1))])).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].dot_path(), "b");
        assert_eq!(err.issues()[0].code(), "invalid_type");

        let open = record(union([literal("a"), string().into()]), number());
        assert_eq!(enumerable_keys(&union([literal("a"), string().into()])), None);
        assert!(open
            .safe_parse(Value::object([("a", Value::from(1))]))
            .unwrap()
            .is_success());
    }

    #[test]
    fn partial_record_allows_missing_options() {
        let s = partial_record(enumeration(["a", "b"]), number());
        assert!(s
            .safe_parse(Value::object([("a", Value::from(1))]))
            .unwrap()
            .is_success());
    }

    #[test]
    fn rejects_non_objects() {
        let err = record(string(), number()).parse(Value::array([])).unwrap_err();
        assert_eq!(
            err.issues()[0].message,
            "Invalid input: expected record, received array"
        );
    }
}
