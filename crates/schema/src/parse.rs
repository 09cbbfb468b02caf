//! Parse entry points
//!
//! Both entry points drive the same walker. The sync one polls it exactly
//! once: nothing in the walker awaits real I/O unless an async refinement
//! or transform is reached, and those fail fast in sync mode.

use std::sync::Arc;

use futures::FutureExt;
use sieve_value::Value;

use crate::config::ParseOptions;
use crate::foundation::{ParseContext, ParseMode, Schema, SchemaError, ValidationError};

/// Outcome of a non-throwing parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Success(Value),
    Failure(ValidationError),
}

impl ParseResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The parsed value, if the parse succeeded.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The issues, if the parse failed.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl From<ParseResult> for Result<Value, ValidationError> {
    fn from(result: ParseResult) -> Self {
        result.into_result()
    }
}

fn finish(value: Value, ctx: ParseContext) -> ParseResult {
    let mode = ctx.mode();
    let issues = ctx.into_issues();
    if issues.is_empty() {
        tracing::trace!(?mode, "parse succeeded");
        ParseResult::Success(value)
    } else {
        tracing::debug!(?mode, issues = issues.len(), "parse failed");
        ParseResult::Failure(ValidationError::new(issues))
    }
}

/// Runs `schema` over `input` without awaiting.
pub(crate) fn run_sync(
    schema: &Schema,
    input: Value,
    options: Arc<ParseOptions>,
) -> Result<ParseResult, SchemaError> {
    let mut ctx = ParseContext::new(ParseMode::Sync, options);
    let polled = schema.run(input, &mut ctx).now_or_never();
    match polled {
        Some(value) => Ok(finish(value?, ctx)),
        None => Err(SchemaError::AsyncInSync),
    }
}

/// Runs `schema` over `input`, permitting async steps.
pub(crate) async fn run_async(
    schema: &Schema,
    input: Value,
    options: Arc<ParseOptions>,
) -> Result<ParseResult, SchemaError> {
    let mut ctx = ParseContext::new(ParseMode::Async, options);
    let value = schema.run(input, &mut ctx).await?;
    Ok(finish(value, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn result_accessors() {
        let ok = string().safe_parse("x").unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&Value::from("x")));
        assert!(ok.error().is_none());

        let bad = number().safe_parse("x").unwrap();
        assert!(!bad.is_success());
        assert_eq!(bad.error().map(ValidationError::len), Some(1));
        assert!(bad.into_result().is_err());
    }

    #[test]
    fn async_refinement_fails_sync_parse() {
        let schema = string().refine_async(|_| async { true }, "never");
        assert_eq!(schema.safe_parse("x"), Err(SchemaError::AsyncInSync));
    }

    #[tokio::test]
    async fn async_parse_runs_async_refinement() {
        let schema = string().refine_async(|v| async move { v.as_str() == Some("ok") }, "not ok");
        assert!(schema.safe_parse_async("ok").await.unwrap().is_success());
        let failed = schema.safe_parse_async("no").await.unwrap();
        assert_eq!(failed.error().map(|e| e.issues()[0].message.clone()), Some("not ok".into()));
    }
}
