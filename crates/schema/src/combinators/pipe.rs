//! Pipes and transforms

use std::sync::Arc;

use sieve_value::Value;

use crate::foundation::checks::RefinementCtx;
use crate::foundation::{Def, Io, ParseContext, Schema, SchemaError, TransformFn};

pub(crate) async fn parse_pipe(
    left: &Schema,
    output: &Schema,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    if ctx.io() == Io::Output {
        return output.run(input, ctx).await;
    }
    let mark = ctx.mark();
    let value = left.run(input, ctx).await?;
    if ctx.failed_since(mark) {
        return Ok(value);
    }
    output.run(value, ctx).await
}

pub(crate) async fn parse_transform(
    f: &TransformFn,
    input: Value,
    ctx: &mut ParseContext,
) -> Result<Value, SchemaError> {
    if ctx.io() == Io::Output {
        return Ok(input);
    }
    match f {
        TransformFn::Sync(f) => {
            let rctx = RefinementCtx::new();
            let out = f(input.clone(), &rctx);
            rctx.flush(&input, ctx, None);
            Ok(out)
        }
        TransformFn::Async(f) => {
            ctx.require_async()?;
            Ok(f(input).await)
        }
    }
}

/// A bare transform step. Accepts any input.
pub fn transform<F>(f: F) -> Schema
where
    F: Fn(Value, &RefinementCtx) -> Value + Send + Sync + 'static,
{
    Schema::from_def(Def::Transform(TransformFn::Sync(Arc::new(f))))
}

/// Runs `f` on the raw input before `schema` sees it.
///
/// ```rust,ignore
/// let trimmed = preprocess(|v, _| match v.as_str() {
///     Some(s) => Value::from(s.trim()),
///     None => v,
/// }, string().min(1));
/// ```
pub fn preprocess<F>(f: F, schema: impl Into<Schema>) -> Schema
where
    F: Fn(Value, &RefinementCtx) -> Value + Send + Sync + 'static,
{
    Schema::from_def(Def::Pipe {
        input: transform(f),
        output: schema.into(),
    })
}
