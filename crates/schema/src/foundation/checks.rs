//! Checks attached to schema nodes
//!
//! A check runs after its node's structural validation succeeded. Checks
//! run in attachment order; the first non-continuable failure skips the
//! rest of the node's checks.
//!
//! Bounds are *tightened* rather than stacked: attaching a second minimum
//! keeps only the stricter of the two, so `min(3).min(5)` and `min(5)`
//! behave the same.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use regex::Regex;
use sieve_value::{PathSegment, Value};
use smallvec::SmallVec;

use crate::foundation::context::ParseContext;
use crate::foundation::error::SchemaError;
use crate::foundation::issue::{Format, IssueKind, Limit, Origin};
use crate::foundation::params::{ErrorMessage, Params};

/// Largest integer a double represents exactly.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ============================================================================
// CHECK KINDS
// ============================================================================

/// A string matcher for a named format.
#[derive(Clone)]
pub(crate) struct FormatCheck {
    pub(crate) format: Format,
    pub(crate) matcher: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    /// The pattern exported to JSON Schema and reported in issues.
    pub(crate) pattern: Option<String>,
}

impl FormatCheck {
    pub(crate) fn new<F>(format: Format, pattern: Option<String>, matcher: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            format,
            matcher: Arc::new(matcher),
            pattern,
        }
    }

    /// A format checked by a single regex whose source is also the
    /// exported pattern.
    pub(crate) fn regex(format: Format, regex: &'static Regex) -> Self {
        Self::new(format, Some(regex.as_str().to_owned()), move |s| regex.is_match(s))
    }
}

/// In-place string rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overwrite {
    Trim,
    Lowercase,
    Uppercase,
}

/// Predicate of a `refine` check.
#[derive(Clone)]
pub(crate) enum Refinement {
    Sync(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
    Async(Arc<dyn Fn(Value) -> BoxFuture<'static, bool> + Send + Sync>),
}

/// Body of a `super_refine` check.
#[derive(Clone)]
pub(crate) enum SuperRefinement {
    Sync(Arc<dyn Fn(&Value, &RefinementCtx) + Send + Sync>),
    Async(Arc<dyn Fn(Value, RefinementCtx) -> BoxFuture<'static, ()> + Send + Sync>),
}

#[derive(Clone)]
pub(crate) enum CheckKind {
    Min {
        origin: Origin,
        limit: Limit,
        inclusive: bool,
    },
    Max {
        origin: Origin,
        limit: Limit,
        inclusive: bool,
    },
    Length {
        origin: Origin,
        exact: usize,
    },
    MultipleOf(Limit),
    /// Integral and within the safe integer range.
    Int,
    Format(FormatCheck),
    Regex {
        regex: Regex,
        format: Format,
    },
    StartsWith(String),
    EndsWith(String),
    Includes(String),
    Overwrite(Overwrite),
    Refine(Refinement),
    SuperRefine(SuperRefinement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Min,
    Max,
    Length,
}

impl CheckKind {
    pub(crate) fn slot(&self) -> Option<Slot> {
        match self {
            Self::Min { .. } => Some(Slot::Min),
            Self::Max { .. } => Some(Slot::Max),
            Self::Length { .. } => Some(Slot::Length),
            _ => None,
        }
    }

    /// True if `self` is a stricter bound than `other` in the same slot.
    pub(crate) fn tighter_than(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Min {
                    limit: a,
                    inclusive: ia,
                    ..
                },
                Self::Min {
                    limit: b,
                    inclusive: ib,
                    ..
                },
            ) => match a.partial_cmp_same(b) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => !ia && *ib,
                _ => false,
            },
            (
                Self::Max {
                    limit: a,
                    inclusive: ia,
                    ..
                },
                Self::Max {
                    limit: b,
                    inclusive: ib,
                    ..
                },
            ) => match a.partial_cmp_same(b) {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => !ia && *ib,
                _ => false,
            },
            (Self::Length { .. }, Self::Length { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min {
                limit, inclusive, ..
            } => write!(f, "Min({limit}, inclusive={inclusive})"),
            Self::Max {
                limit, inclusive, ..
            } => write!(f, "Max({limit}, inclusive={inclusive})"),
            Self::Length { exact, .. } => write!(f, "Length({exact})"),
            Self::MultipleOf(d) => write!(f, "MultipleOf({d})"),
            Self::Int => f.write_str("Int"),
            Self::Format(c) => write!(f, "Format({})", c.format),
            Self::Regex { regex, .. } => write!(f, "Regex(/{}/)", regex.as_str()),
            Self::StartsWith(s) => write!(f, "StartsWith({s:?})"),
            Self::EndsWith(s) => write!(f, "EndsWith({s:?})"),
            Self::Includes(s) => write!(f, "Includes({s:?})"),
            Self::Overwrite(o) => write!(f, "Overwrite({o:?})"),
            Self::Refine(_) => f.write_str("Refine(<fn>)"),
            Self::SuperRefine(_) => f.write_str("SuperRefine(<fn>)"),
        }
    }
}

/// One attached check with its parameters.
#[derive(Debug, Clone)]
pub(crate) struct Check {
    pub(crate) kind: CheckKind,
    pub(crate) params: Params,
}

impl Check {
    pub(crate) fn new(kind: CheckKind, params: Params) -> Self {
        Self { kind, params }
    }

    pub(crate) fn plain(kind: CheckKind) -> Self {
        Self::new(kind, Params::default())
    }
}

// ============================================================================
// BAG
// ============================================================================

/// Effective constraints of a node, derived from its checks. Consumed by
/// the JSON Schema projector and by introspection helpers such as
/// `StringSchema::min_length`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bag {
    /// Lower bound and whether it is inclusive.
    pub minimum: Option<(Limit, bool)>,
    /// Upper bound and whether it is inclusive.
    pub maximum: Option<(Limit, bool)>,
    /// The most recently attached divisor.
    pub multiple_of: Option<Limit>,
    pub int: bool,
    pub formats: SmallVec<[Format; 2]>,
    /// Patterns of format and regex checks, in attachment order.
    pub patterns: SmallVec<[String; 2]>,
}

impl Bag {
    pub(crate) fn from_checks(checks: &[Check]) -> Self {
        let mut bag = Self::default();
        for check in checks {
            match &check.kind {
                CheckKind::Min {
                    limit, inclusive, ..
                } => tighten(&mut bag.minimum, limit, *inclusive, Ordering::Greater),
                CheckKind::Max {
                    limit, inclusive, ..
                } => tighten(&mut bag.maximum, limit, *inclusive, Ordering::Less),
                CheckKind::Length { exact, .. } => {
                    let exact = Limit::Size(*exact);
                    tighten(&mut bag.minimum, &exact, true, Ordering::Greater);
                    tighten(&mut bag.maximum, &exact, true, Ordering::Less);
                }
                CheckKind::MultipleOf(d) => bag.multiple_of = Some(d.clone()),
                CheckKind::Int => bag.int = true,
                CheckKind::Format(c) => {
                    bag.formats.push(c.format);
                    bag.patterns.extend(c.pattern.clone());
                }
                CheckKind::Regex { regex, format } => {
                    bag.formats.push(*format);
                    bag.patterns.push(regex.as_str().to_owned());
                }
                CheckKind::StartsWith(s) => {
                    bag.patterns.push(format!("^{}.*", regex::escape(s)));
                }
                CheckKind::EndsWith(s) => {
                    bag.patterns.push(format!(".*{}$", regex::escape(s)));
                }
                CheckKind::Includes(s) => bag.patterns.push(regex::escape(s)),
                CheckKind::Overwrite(_) | CheckKind::Refine(_) | CheckKind::SuperRefine(_) => {}
            }
        }
        bag
    }

    /// Returns the size bounds as `(min, max)` lengths.
    #[must_use]
    pub fn size_bounds(&self) -> (Option<usize>, Option<usize>) {
        let size = |bound: &Option<(Limit, bool)>, shift: isize| match bound {
            Some((Limit::Size(n), inclusive)) => {
                Some(if *inclusive { *n } else { n.saturating_add_signed(shift) })
            }
            _ => None,
        };
        (size(&self.minimum, 1), size(&self.maximum, -1))
    }
}

/// Replaces `bound` if `limit` is stricter, i.e. compares as `stricter`
/// or is equal but exclusive. Bounds of different kinds never replace.
fn tighten(
    bound: &mut Option<(Limit, bool)>,
    limit: &Limit,
    inclusive: bool,
    stricter: Ordering,
) {
    let replace = match bound {
        None => true,
        Some((current, current_inclusive)) => match limit.partial_cmp_same(current) {
            Some(Ordering::Equal) => *current_inclusive && !inclusive,
            Some(order) => order == stricter,
            None => false,
        },
    };
    if replace {
        *bound = Some((limit.clone(), inclusive));
    }
}

// ============================================================================
// REFINEMENT CONTEXT
// ============================================================================

/// An issue raised from `super_refine`.
#[derive(Debug, Clone)]
pub struct RefinementIssue {
    pub(crate) kind: IssueKind,
    pub(crate) message: Option<String>,
    pub(crate) path: Vec<PathSegment>,
    pub(crate) fatal: bool,
}

impl RefinementIssue {
    /// A `custom` issue with a message.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::custom(),
            message: Some(message.into()),
            path: Vec::new(),
            fatal: false,
        }
    }

    /// An issue of any kind; the message comes from the usual sources.
    #[must_use]
    pub fn new(kind: IssueKind) -> Self {
        Self {
            kind,
            message: None,
            path: Vec::new(),
            fatal: false,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Locates the issue below the refined value.
    #[must_use = "builder methods must be chained or built"]
    pub fn path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Stops the remaining checks of the node.
    #[must_use = "builder methods must be chained or built"]
    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }
}

impl From<&str> for RefinementIssue {
    fn from(value: &str) -> Self {
        Self::custom(value)
    }
}

impl From<String> for RefinementIssue {
    fn from(value: String) -> Self {
        Self::custom(value)
    }
}

/// Collects issues raised by a `super_refine` body.
///
/// Cloning shares the underlying list, so an async body can move its copy
/// into the returned future.
#[derive(Debug, Clone, Default)]
pub struct RefinementCtx {
    issues: Arc<Mutex<Vec<RefinementIssue>>>,
}

impl RefinementCtx {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises an issue.
    pub fn add_issue(&self, issue: impl Into<RefinementIssue>) {
        self.issues.lock().push(issue.into());
    }

    /// Returns the number of issues raised so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.lock().is_empty()
    }

    pub(crate) fn drain(&self) -> Vec<RefinementIssue> {
        std::mem::take(&mut *self.issues.lock())
    }

    /// Records the raised issues on `ctx`.
    pub(crate) fn flush(&self, value: &Value, ctx: &mut ParseContext, fallback: Option<&ErrorMessage>) {
        for issue in self.drain() {
            let message = issue.message.map(ErrorMessage::Text);
            let custom = message.as_ref().or(fallback);
            ctx.push(issue.kind, value, custom, &issue.path, !issue.fatal);
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

fn measure_size(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        Value::Set(s) => Some(s.len()),
        Value::Map(m) => Some(m.len()),
        _ => None,
    }
}

fn measure(origin: Origin, value: &Value) -> Option<Limit> {
    match origin {
        Origin::Number => value.as_f64().map(Limit::Number),
        Origin::BigInt => value.as_bigint().map(Limit::BigInt),
        Origin::Date => value.as_date().copied().map(Limit::Date),
        _ => measure_size(value).map(Limit::Size),
    }
}

fn decimals(n: f64) -> u32 {
    let text = format!("{n}");
    text.split_once('.')
        .map_or(0, |(_, frac)| u32::try_from(frac.len()).unwrap_or(u32::MAX))
}

/// Remainder that treats decimal steps exactly: `0.3 % 0.1 == 0`.
pub(crate) fn float_safe_remainder(value: f64, step: f64) -> f64 {
    let scale = decimals(value).max(decimals(step));
    if scale > 15 {
        return value % step;
    }
    let factor = 10f64.powi(scale as i32);
    let value_int = (value * factor).round();
    let step_int = (step * factor).round();
    if step_int == 0.0 {
        return value % step;
    }
    (value_int % step_int) / factor
}

impl Check {
    /// Runs the check against `value`, returning the (possibly rewritten)
    /// value.
    pub(crate) async fn apply(&self, value: Value, ctx: &mut ParseContext) -> Result<Value, SchemaError> {
        let custom = self.params.message.as_ref();
        let continuable = !self.params.abort;
        match &self.kind {
            CheckKind::Min {
                origin,
                limit,
                inclusive,
            } => {
                if let Some(actual) = measure(*origin, &value) {
                    let ok = actual.partial_cmp_same(limit).is_some_and(|ord| {
                        ord.is_gt() || (*inclusive && ord.is_eq())
                    });
                    if !ok {
                        let kind = IssueKind::TooSmall {
                            origin: *origin,
                            minimum: limit.clone(),
                            inclusive: *inclusive,
                            exact: false,
                        };
                        ctx.push(kind, &value, custom, &[], continuable);
                    }
                }
            }
            CheckKind::Max {
                origin,
                limit,
                inclusive,
            } => {
                if let Some(actual) = measure(*origin, &value) {
                    let ok = actual.partial_cmp_same(limit).is_some_and(|ord| {
                        ord.is_lt() || (*inclusive && ord.is_eq())
                    });
                    if !ok {
                        let kind = IssueKind::TooBig {
                            origin: *origin,
                            maximum: limit.clone(),
                            inclusive: *inclusive,
                            exact: false,
                        };
                        ctx.push(kind, &value, custom, &[], continuable);
                    }
                }
            }
            CheckKind::Length { origin, exact } => {
                if let Some(size) = measure_size(&value) {
                    let kind = if size > *exact {
                        Some(IssueKind::TooBig {
                            origin: *origin,
                            maximum: Limit::Size(*exact),
                            inclusive: true,
                            exact: true,
                        })
                    } else if size < *exact {
                        Some(IssueKind::TooSmall {
                            origin: *origin,
                            minimum: Limit::Size(*exact),
                            inclusive: true,
                            exact: true,
                        })
                    } else {
                        None
                    };
                    if let Some(kind) = kind {
                        ctx.push(kind, &value, custom, &[], continuable);
                    }
                }
            }
            CheckKind::MultipleOf(divisor) => {
                let ok = match (divisor, &value) {
                    (Limit::Number(d), Value::Number(n)) => float_safe_remainder(*n, *d) == 0.0,
                    (Limit::BigInt(d), Value::BigInt(n)) => *d != 0 && n % d == 0,
                    _ => true,
                };
                if !ok {
                    let kind = IssueKind::NotMultipleOf {
                        divisor: divisor.clone(),
                    };
                    ctx.push(kind, &value, custom, &[], continuable);
                }
            }
            CheckKind::Int => {
                if let Value::Number(n) = value {
                    if !n.is_finite() || n.fract() != 0.0 {
                        let kind = IssueKind::InvalidType {
                            expected: crate::foundation::issue::Expected::Int,
                            received: value.kind(),
                        };
                        ctx.push(kind, &value, custom, &[], false);
                    } else if n > MAX_SAFE_INTEGER {
                        let kind = IssueKind::TooBig {
                            origin: Origin::Number,
                            maximum: Limit::Number(MAX_SAFE_INTEGER),
                            inclusive: true,
                            exact: false,
                        };
                        ctx.push(kind, &value, custom, &[], continuable);
                    } else if n < -MAX_SAFE_INTEGER {
                        let kind = IssueKind::TooSmall {
                            origin: Origin::Number,
                            minimum: Limit::Number(-MAX_SAFE_INTEGER),
                            inclusive: true,
                            exact: false,
                        };
                        ctx.push(kind, &value, custom, &[], continuable);
                    }
                }
            }
            CheckKind::Format(check) => {
                if let Some(s) = value.as_str() {
                    if !(check.matcher)(s) {
                        let kind = IssueKind::invalid_format(check.format, check.pattern.clone());
                        ctx.push(kind, &value, custom, &[], continuable);
                    }
                }
            }
            CheckKind::Regex { regex, format } => {
                if let Some(s) = value.as_str() {
                    if !regex.is_match(s) {
                        let kind = IssueKind::invalid_format(*format, Some(regex.as_str().to_owned()));
                        ctx.push(kind, &value, custom, &[], continuable);
                    }
                }
            }
            CheckKind::StartsWith(prefix) => {
                if value.as_str().is_some_and(|s| !s.starts_with(prefix.as_str())) {
                    let kind = IssueKind::InvalidFormat {
                        format: Format::StartsWith,
                        pattern: None,
                        prefix: Some(prefix.clone()),
                        suffix: None,
                        includes: None,
                    };
                    ctx.push(kind, &value, custom, &[], continuable);
                }
            }
            CheckKind::EndsWith(suffix) => {
                if value.as_str().is_some_and(|s| !s.ends_with(suffix.as_str())) {
                    let kind = IssueKind::InvalidFormat {
                        format: Format::EndsWith,
                        pattern: None,
                        prefix: None,
                        suffix: Some(suffix.clone()),
                        includes: None,
                    };
                    ctx.push(kind, &value, custom, &[], continuable);
                }
            }
            CheckKind::Includes(needle) => {
                if value.as_str().is_some_and(|s| !s.contains(needle.as_str())) {
                    let kind = IssueKind::InvalidFormat {
                        format: Format::Includes,
                        pattern: None,
                        prefix: None,
                        suffix: None,
                        includes: Some(needle.clone()),
                    };
                    ctx.push(kind, &value, custom, &[], continuable);
                }
            }
            CheckKind::Overwrite(op) => {
                if let Value::String(s) = &value {
                    let rewritten = match op {
                        Overwrite::Trim => s.trim().to_owned(),
                        Overwrite::Lowercase => s.to_lowercase(),
                        Overwrite::Uppercase => s.to_uppercase(),
                    };
                    return Ok(Value::String(rewritten));
                }
            }
            CheckKind::Refine(refinement) => {
                let ok = match refinement {
                    Refinement::Sync(f) => f(&value),
                    Refinement::Async(f) => {
                        ctx.require_async()?;
                        f(value.clone()).await
                    }
                };
                if !ok {
                    let kind = IssueKind::Custom {
                        params: self.params.params.clone(),
                    };
                    ctx.push(kind, &value, custom, &self.params.path, continuable);
                }
            }
            CheckKind::SuperRefine(body) => {
                let rctx = RefinementCtx::new();
                match body {
                    SuperRefinement::Sync(f) => f(&value, &rctx),
                    SuperRefinement::Async(f) => {
                        ctx.require_async()?;
                        f(value.clone(), rctx.clone()).await;
                    }
                }
                rctx.flush(&value, ctx, custom);
            }
        }
        Ok(value)
    }
}

/// Runs `checks` in order, stopping at the first non-continuable failure
/// recorded since `mark`.
pub(crate) async fn run_checks(
    checks: &[Check],
    mut value: Value,
    ctx: &mut ParseContext,
    mark: usize,
) -> Result<Value, SchemaError> {
    for check in checks {
        if ctx.aborted_since(mark) {
            break;
        }
        value = check.apply(value, ctx).await?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::foundation::context::ParseMode;
    use futures::FutureExt;
    use rstest::rstest;

    fn min(limit: f64, inclusive: bool) -> CheckKind {
        CheckKind::Min {
            origin: Origin::Number,
            limit: Limit::Number(limit),
            inclusive,
        }
    }

    fn run(checks: &[Check], value: Value) -> (Value, ParseContext) {
        let mut ctx = ParseContext::new(ParseMode::Sync, Arc::new(ParseOptions::default()));
        let out = run_checks(checks, value, &mut ctx, 0)
            .now_or_never()
            .unwrap()
            .unwrap();
        (out, ctx)
    }

    #[test]
    fn tighter_bounds() {
        assert!(min(5.0, true).tighter_than(&min(3.0, true)));
        assert!(!min(3.0, true).tighter_than(&min(5.0, true)));
        assert!(min(3.0, false).tighter_than(&min(3.0, true)));
        assert!(!min(3.0, true).tighter_than(&min(3.0, false)));
    }

    #[test]
    fn float_remainder_handles_decimal_steps() {
        assert_eq!(float_safe_remainder(0.3, 0.1), 0.0);
        assert_eq!(float_safe_remainder(10.0, 5.0), 0.0);
        assert!(float_safe_remainder(0.35, 0.1) != 0.0);
    }

    #[test]
    fn abort_stops_later_checks() {
        let checks = vec![
            Check::new(min(10.0, true), Params::new().abort()),
            Check::plain(min(20.0, true)),
        ];
        let (_, ctx) = run(&checks, Value::from(1));
        assert_eq!(ctx.issues().len(), 1);
    }

    #[test]
    fn continuable_failures_accumulate() {
        let checks = vec![Check::plain(min(10.0, true)), Check::plain(min(20.0, true))];
        let (_, ctx) = run(&checks, Value::from(1));
        assert_eq!(ctx.issues().len(), 2);
    }

    #[test]
    fn int_rejects_fractions_and_unsafe_values() {
        let checks = vec![Check::plain(CheckKind::Int)];
        let (_, ctx) = run(&checks, Value::from(1.5));
        assert_eq!(ctx.issues()[0].code(), "invalid_type");
        assert!(!ctx.issues()[0].is_continuable());
        let (_, ctx) = run(&checks, Value::from(1e300));
        assert_eq!(ctx.issues()[0].code(), "too_big");
    }

    #[test]
    fn overwrite_rewrites_value() {
        let checks = vec![
            Check::plain(CheckKind::Overwrite(Overwrite::Trim)),
            Check::plain(CheckKind::Overwrite(Overwrite::Uppercase)),
        ];
        let (out, _) = run(&checks, Value::from("  ab "));
        assert_eq!(out, Value::from("AB"));
    }

    #[test]
    fn string_length_counts_characters() {
        let checks = vec![Check::plain(CheckKind::Length {
            origin: Origin::String,
            exact: 2,
        })];
        let (_, ctx) = run(&checks, Value::from("é✓"));
        assert!(ctx.issues().is_empty());
    }

    #[test]
    fn super_refine_collects_issues() {
        let body: Arc<dyn Fn(&Value, &RefinementCtx) + Send + Sync> = Arc::new(|_, rctx| {
            rctx.add_issue("first");
            rctx.add_issue(RefinementIssue::custom("second").path(["a"]));
        });
        let checks = vec![Check::plain(CheckKind::SuperRefine(SuperRefinement::Sync(body)))];
        let (_, ctx) = run(&checks, Value::Null);
        assert_eq!(ctx.issues().len(), 2);
        assert_eq!(ctx.issues()[1].message, "second");
        assert_eq!(ctx.issues()[1].dot_path(), "a");
    }

    #[test]
    fn bag_reflects_checks() {
        let checks = vec![
            Check::plain(CheckKind::Length {
                origin: Origin::String,
                exact: 4,
            }),
            Check::plain(CheckKind::MultipleOf(Limit::Number(2.0))),
        ];
        let bag = Bag::from_checks(&checks);
        assert_eq!(bag.size_bounds(), (Some(4), Some(4)));
        assert_eq!(bag.multiple_of, Some(Limit::Number(2.0)));
    }

    #[rstest]
    #[case::length_then_looser_min(vec![length(5), size_min(3)], (Some(5), Some(5)))]
    #[case::min_then_length(vec![size_min(7), length(5)], (Some(7), Some(5)))]
    #[case::length_then_looser_max(vec![length(5), size_max(9)], (Some(5), Some(5)))]
    #[case::max_then_length(vec![size_max(3), length(5)], (Some(5), Some(3)))]
    fn bag_keeps_the_tightest_size_bound(
        #[case] checks: Vec<CheckKind>,
        #[case] expected: (Option<usize>, Option<usize>),
    ) {
        let checks: Vec<Check> = checks.into_iter().map(Check::plain).collect();
        assert_eq!(Bag::from_checks(&checks).size_bounds(), expected);
    }

    #[test]
    fn exclusive_bound_beats_equal_inclusive_one() {
        let checks = vec![Check::plain(min(2.0, true)), Check::plain(min(2.0, false))];
        assert_eq!(Bag::from_checks(&checks).minimum, Some((Limit::Number(2.0), false)));
        let checks = vec![Check::plain(min(2.0, false)), Check::plain(min(2.0, true))];
        assert_eq!(Bag::from_checks(&checks).minimum, Some((Limit::Number(2.0), false)));
    }

    fn length(exact: usize) -> CheckKind {
        CheckKind::Length {
            origin: Origin::String,
            exact,
        }
    }

    fn size_min(n: usize) -> CheckKind {
        CheckKind::Min {
            origin: Origin::String,
            limit: Limit::Size(n),
            inclusive: true,
        }
    }

    fn size_max(n: usize) -> CheckKind {
        CheckKind::Max {
            origin: Origin::String,
            limit: Limit::Size(n),
            inclusive: true,
        }
    }
}
