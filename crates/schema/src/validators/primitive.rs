//! Structural checks of the primitive kinds
//!
//! Each `parse_*` function checks the runtime category of the input and
//! records an `invalid_type` issue on mismatch. Bounds and formats are
//! checks, run afterwards by the walker.

use sieve_value::Value;

use crate::foundation::checks::{Check, CheckKind, Refinement};
use crate::foundation::{Def, ErrorMessage, Expected, IssueKind, ParseContext, Params, Schema};
use crate::validators::coerce;

// ============================================================================
// PARSERS
// ============================================================================

fn expect(
    ok: bool,
    expected: Expected,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    if !ok {
        ctx.report(IssueKind::invalid_type(expected, &input), &input, err);
    }
    input
}

pub(crate) fn parse_string(
    coerce: bool,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    let input = if coerce { coerce::to_string(input) } else { input };
    let ok = matches!(input, Value::String(_));
    expect(ok, Expected::String, input, ctx, err)
}

pub(crate) fn parse_number(
    coerce: bool,
    allow_infinite: bool,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    let input = if coerce { coerce::to_number(input) } else { input };
    let ok = match input {
        Value::Number(n) => !n.is_nan() && (allow_infinite || n.is_finite()),
        _ => false,
    };
    expect(ok, Expected::Number, input, ctx, err)
}

pub(crate) fn parse_bigint(
    coerce: bool,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    let input = if coerce { coerce::to_bigint(input) } else { input };
    let ok = matches!(input, Value::BigInt(_));
    expect(ok, Expected::BigInt, input, ctx, err)
}

pub(crate) fn parse_boolean(
    coerce: bool,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    let input = if coerce { coerce::to_boolean(input) } else { input };
    let ok = matches!(input, Value::Bool(_));
    expect(ok, Expected::Boolean, input, ctx, err)
}

pub(crate) fn parse_date(
    coerce: bool,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    let input = if coerce { coerce::to_date(input) } else { input };
    let ok = matches!(input, Value::Date(_));
    expect(ok, Expected::Date, input, ctx, err)
}

/// Kinds without configuration: symbol, undefined, null, any, unknown,
/// never, void, NaN and custom.
pub(crate) fn parse_special(
    def: &Def,
    input: Value,
    ctx: &mut ParseContext,
    err: Option<&ErrorMessage>,
) -> Value {
    let (ok, expected) = match def {
        Def::Symbol => (matches!(input, Value::Symbol(_)), Expected::Symbol),
        Def::Undefined => (input.is_undefined(), Expected::Undefined),
        Def::Void => (input.is_undefined(), Expected::Void),
        Def::Null => (input.is_null(), Expected::Null),
        Def::Never => (false, Expected::Never),
        Def::NaN => (
            matches!(input, Value::Number(n) if n.is_nan()),
            Expected::Nan,
        ),
        _ => return input,
    };
    expect(ok, expected, input, ctx, err)
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

pub(crate) fn boolean_with(coerce: bool) -> Schema {
    Schema::from_def(Def::Boolean { coerce })
}

/// Accepts `true` and `false`.
#[must_use]
pub fn boolean() -> Schema {
    boolean_with(false)
}

/// Accepts symbols.
#[must_use]
pub fn symbol() -> Schema {
    Schema::from_def(Def::Symbol)
}

/// Accepts only `undefined`.
#[must_use]
pub fn undefined() -> Schema {
    Schema::from_def(Def::Undefined)
}

/// Accepts only `null`.
#[must_use]
pub fn null() -> Schema {
    Schema::from_def(Def::Null)
}

/// Accepts anything.
#[must_use]
pub fn any() -> Schema {
    Schema::from_def(Def::Any)
}

/// Accepts anything.
#[must_use]
pub fn unknown() -> Schema {
    Schema::from_def(Def::Unknown)
}

/// Rejects everything.
#[must_use]
pub fn never() -> Schema {
    Schema::from_def(Def::Never)
}

/// Accepts only `undefined`; reported as `void`.
#[must_use]
pub fn void() -> Schema {
    Schema::from_def(Def::Void)
}

/// Accepts only `NaN`.
#[must_use]
pub fn nan() -> Schema {
    Schema::from_def(Def::NaN)
}

/// Accepts any value the predicate approves. A rejection records a
/// `custom` issue.
///
/// ```rust,ignore
/// let even = custom(|v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0), "must be even");
/// ```
pub fn custom<F>(predicate: F, params: impl Into<Params>) -> Schema
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let kind = CheckKind::Refine(Refinement::Sync(std::sync::Arc::new(predicate)));
    Schema::from_def(Def::Custom).with_check(Check::new(kind, params.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaType;
    use sieve_value::Symbol;

    #[test]
    fn special_kinds() {
        assert!(symbol().safe_parse(Symbol::new("s")).unwrap().is_success());
        assert!(undefined().safe_parse(Value::Undefined).unwrap().is_success());
        assert!(!undefined().safe_parse(Value::Null).unwrap().is_success());
        assert!(null().safe_parse(Value::Null).unwrap().is_success());
        assert!(any().safe_parse(Value::from(1)).unwrap().is_success());
        assert!(unknown().safe_parse(Value::Undefined).unwrap().is_success());
        assert!(nan().safe_parse(Value::Number(f64::NAN)).unwrap().is_success());
        assert!(!nan().safe_parse(Value::from(1)).unwrap().is_success());
    }

    #[test]
    fn never_rejects_with_expected_never() {
        let err = never().parse(Value::from(1)).unwrap_err();
        assert_eq!(err.issues()[0].message, "Invalid input: expected never, received number");
    }

    #[test]
    fn void_reports_void() {
        let err = void().parse(Value::Null).unwrap_err();
        assert_eq!(err.issues()[0].message, "Invalid input: expected void, received null");
    }

    #[test]
    fn boolean_rejects_strings() {
        assert!(boolean().safe_parse(true).unwrap().is_success());
        let err = boolean().parse("true").unwrap_err();
        assert_eq!(err.issues()[0].code(), "invalid_type");
    }

    #[test]
    fn custom_predicate() {
        let even = custom(|v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0), "must be even");
        assert!(even.safe_parse(4).unwrap().is_success());
        let err = even.parse(3).unwrap_err();
        assert_eq!(err.issues()[0].code(), "custom");
        assert_eq!(err.issues()[0].message, "must be even");
    }
}
