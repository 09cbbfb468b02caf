//! Wrapper nodes: optional, nullable, default, prefault, catch, readonly,
//! nonoptional

use sieve_value::Value;

use crate::foundation::{
    CatchValue, ErrorMessage, Expected, Fallback, Io, Issue, IssueKind, ParseContext, Schema,
    SchemaError, ValidationError,
};

/// What a `catch_with` handler sees about the failure it replaces.
#[derive(Debug, Clone)]
pub struct CatchContext {
    issues: Vec<Issue>,
    input: Value,
}

impl CatchContext {
    /// The issues the inner schema recorded.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The input the inner schema rejected.
    #[must_use]
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// The dropped issues as an error value.
    #[must_use]
    pub fn error(&self) -> ValidationError {
        ValidationError::new(self.issues.clone())
    }
}

pub(crate) async fn parse_optional(
    inner: &Schema,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    if !input.is_undefined() {
        return inner.run(input, ctx).await;
    }
    if !inner.optin() {
        return Ok(input);
    }
    // An inner default may still fill the value in; if the inner schema
    // rejects the absence, absence wins.
    let mark = ctx.mark();
    let value = inner.run(input, ctx).await?;
    if ctx.failed_since(mark) {
        ctx.take_since(mark);
        return Ok(Value::Undefined);
    }
    Ok(value)
}

pub(crate) async fn parse_nullable(
    inner: &Schema,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    if input.is_null() {
        return Ok(input);
    }
    inner.run(input, ctx).await
}

/// Validates a substituted value against the output side of `inner`.
async fn run_output(inner: &Schema, value: Value, ctx: &mut ParseContext) -> Result<Value, SchemaError> {
    let previous = ctx.set_io(Io::Output);
    let result = inner.run(value, ctx).await;
    ctx.set_io(previous);
    result
}

pub(crate) async fn parse_default(
    inner: &Schema,
    fallback: &Fallback,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    if input.is_undefined() {
        return run_output(inner, fallback.get(), ctx).await;
    }
    let value = inner.run(input, ctx).await?;
    if value.is_undefined() {
        return run_output(inner, fallback.get(), ctx).await;
    }
    Ok(value)
}

pub(crate) async fn parse_prefault(
    inner: &Schema,
    fallback: &Fallback,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    let input = if input.is_undefined() {
        fallback.get()
    } else {
        input
    };
    inner.run(input, ctx).await
}

pub(crate) async fn parse_catch(
    inner: &Schema,
    fallback: &CatchValue,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    let mark = ctx.mark();
    let value = inner.run(input.clone(), ctx).await?;
    if !ctx.failed_since(mark) {
        return Ok(value);
    }
    let issues = ctx.take_since(mark);
    Ok(match fallback {
        CatchValue::Value(v) => v.clone(),
        CatchValue::Fn(f) => f(&CatchContext { issues, input }),
    })
}

pub(crate) async fn parse_readonly(
    inner: &Schema,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    Ok(inner.run(input, ctx).await?.freeze())
}

pub(crate) async fn parse_nonoptional(
    inner: &Schema,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Result<Value, SchemaError> {
    let mark = ctx.mark();
    let value = inner.run(input, ctx).await?;
    if !ctx.failed_since(mark) && value.is_undefined() {
        ctx.report(IssueKind::invalid_type(Expected::NonOptional, &value), &value, err);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use crate::combinators::{ObjectSchema, object};
    use crate::foundation::SchemaType;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;
    use sieve_value::Value;

    fn with_port() -> ObjectSchema {
        object([("port", number().default(8080))])
    }

    #[test]
    fn optional_accepts_absence() {
        let s = string().optional();
        assert_eq!(s.parse(Value::Undefined).unwrap(), Value::Undefined);
        assert!(s.parse(Value::Null).is_err());
    }

    #[test]
    fn nullable_accepts_null() {
        let s = string().nullable();
        assert_eq!(s.parse(Value::Null).unwrap(), Value::Null);
        assert!(s.parse(Value::Undefined).is_err());
        assert!(string().nullish().safe_parse(Value::Undefined).unwrap().is_success());
    }

    #[test]
    fn default_fills_missing_keys() {
        let out = with_port().parse(Value::object::<&str, _>([])).unwrap();
        assert_eq!(out, Value::object([("port", Value::from(8080))]));
        let out = with_port().parse(Value::object([("port", Value::from(1))])).unwrap();
        assert_eq!(out, Value::object([("port", Value::from(1))]));
    }

    #[test]
    fn default_skips_input_transforms() {
        let s = string()
            .transform(|v, _| Value::from(v.as_str().map_or(0, str::len)))
            .default(5);
        assert_eq!(s.parse(Value::Undefined).unwrap(), Value::from(5));
        assert_eq!(s.parse("abc").unwrap(), Value::from(3));
    }

    #[test]
    fn prefault_runs_the_full_pipeline() {
        let s = string()
            .transform(|v, _| Value::from(v.as_str().map_or(0, str::len)))
            .prefault("abcd");
        assert_eq!(s.parse(Value::Undefined).unwrap(), Value::from(4));
    }

    #[test]
    fn catch_replaces_failures() {
        let s = number().catch(0);
        assert_eq!(s.parse("x").unwrap(), Value::from(0));
        let s = number().catch_with(|c| Value::from(c.issues().len()));
        assert_eq!(s.parse("x").unwrap(), Value::from(1usize));
    }

    #[test]
    fn catch_context_exposes_input() {
        let s = number().catch_with(|c| c.input().clone());
        assert_eq!(s.parse("raw").unwrap(), Value::from("raw"));
    }

    #[test]
    fn readonly_freezes_output() {
        let s = object([("a", string())]).readonly();
        let out = s.parse(Value::object([("a", Value::from("x"))])).unwrap();
        assert!(out.is_frozen());
    }

    #[test]
    fn nonoptional_rejects_absence() {
        let s = string().optional().nonoptional();
        let err = s.parse(Value::Undefined).unwrap_err();
        assert_eq!(
            err.issues()[0].message,
            "Invalid input: expected nonoptional, received undefined"
        );
        assert_eq!(s.parse("a").unwrap(), Value::from("a"));
    }

    #[test]
    fn optional_default_keeps_the_default() {
        let s = number().default(1).optional();
        assert_eq!(s.parse(Value::Undefined).unwrap(), Value::from(1));
    }
}
