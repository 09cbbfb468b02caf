//! The schema node and the walker
//!
//! A [`Schema`] is a cheap-clone handle to an immutable node. Every builder
//! method returns a new handle; nodes are never mutated after construction,
//! so a schema can be shared freely across threads and parses.
//!
//! Evaluation is one async walker. Sync entry points drive it with
//! `now_or_never`; an async refinement reached in sync mode fails with
//! [`SchemaError::AsyncInSync`] before it is awaited.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use sieve_value::{Literal, Value};

use crate::combinators::{
    intersection, lazy::LazyDef, map, modifiers, object::ObjectDef, pipe, record::RecordDef,
    sequence, union::{DiscriminatedDef, UnionDef}, ArraySchema, CatchContext,
};
use crate::config::ParseOptions;
use crate::foundation::checks::{
    Bag, Check, CheckKind, Refinement, RefinementCtx, SuperRefinement, run_checks,
};
use crate::foundation::context::ParseContext;
use crate::foundation::error::{ParseError, SchemaError};
use crate::foundation::params::{ErrorMessage, Params};
use crate::parse::{self, ParseResult};
use crate::registry::{self, Meta};
use crate::validators::{literal, primitive};

// ============================================================================
// DEFINITIONS
// ============================================================================

/// Fallback of `default` and `prefault`.
#[derive(Clone)]
pub(crate) enum Fallback {
    Value(Value),
    Fn(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl Fallback {
    pub(crate) fn get(&self) -> Value {
        match self {
            Self::Value(v) => v.clone(),
            Self::Fn(f) => f(),
        }
    }
}

/// Fallback of `catch`.
#[derive(Clone)]
pub(crate) enum CatchValue {
    Value(Value),
    Fn(Arc<dyn Fn(&CatchContext) -> Value + Send + Sync>),
}

/// Body of a transform step.
#[derive(Clone)]
pub(crate) enum TransformFn {
    Sync(Arc<dyn Fn(Value, &RefinementCtx) -> Value + Send + Sync>),
    Async(Arc<dyn Fn(Value) -> BoxFuture<'static, Value> + Send + Sync>),
}

/// The closed set of node kinds.
#[derive(Clone)]
pub(crate) enum Def {
    String { coerce: bool },
    Number { coerce: bool, allow_infinite: bool },
    BigInt { coerce: bool },
    Boolean { coerce: bool },
    Date { coerce: bool },
    Literal(Vec<Literal>),
    Enum(Vec<Literal>),
    Symbol,
    Undefined,
    Null,
    Any,
    Unknown,
    Never,
    Void,
    NaN,
    Object(ObjectDef),
    Array(Schema),
    Tuple { items: Vec<Schema>, rest: Option<Schema> },
    Union(UnionDef),
    DiscriminatedUnion(DiscriminatedDef),
    Record(RecordDef),
    Map { key: Schema, value: Schema },
    Set(Schema),
    Intersection(Schema, Schema),
    Optional(Schema),
    Nullable(Schema),
    Default { inner: Schema, fallback: Fallback },
    Prefault { inner: Schema, fallback: Fallback },
    Catch { inner: Schema, fallback: CatchValue },
    Readonly(Schema),
    NonOptional(Schema),
    Brand(Schema),
    Pipe { input: Schema, output: Schema },
    Transform(TransformFn),
    Lazy(LazyDef),
    /// Accepts anything; the predicate is attached as a check.
    Custom,
}

impl Def {
    /// Kind name used in debug output and projector errors.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Number { .. } => "number",
            Self::BigInt { .. } => "bigint",
            Self::Boolean { .. } => "boolean",
            Self::Date { .. } => "date",
            Self::Literal(_) => "literal",
            Self::Enum(_) => "enum",
            Self::Symbol => "symbol",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Void => "void",
            Self::NaN => "nan",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Tuple { .. } => "tuple",
            Self::Union(_) => "union",
            Self::DiscriminatedUnion(_) => "discriminated_union",
            Self::Record(_) => "record",
            Self::Map { .. } => "map",
            Self::Set(_) => "set",
            Self::Intersection(..) => "intersection",
            Self::Optional(_) => "optional",
            Self::Nullable(_) => "nullable",
            Self::Default { .. } => "default",
            Self::Prefault { .. } => "prefault",
            Self::Catch { .. } => "catch",
            Self::Readonly(_) => "readonly",
            Self::NonOptional(_) => "nonoptional",
            Self::Brand(_) => "brand",
            Self::Pipe { .. } => "pipe",
            Self::Transform(_) => "transform",
            Self::Lazy(_) => "lazy",
            Self::Custom => "custom",
        }
    }
}

// ============================================================================
// NODE
// ============================================================================

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) def: Def,
    pub(crate) checks: Vec<Check>,
    /// Index of the most recently attached check, for `with_params`.
    pub(crate) last_check: Option<usize>,
    pub(crate) bag: Bag,
    /// Message for the node's own structural issues.
    pub(crate) error: Option<ErrorMessage>,
    /// Set on clones made by `describe`/`meta`; metadata is inherited from
    /// the parent and the projector references it.
    pub(crate) parent: Option<Schema>,
}

impl Node {
    pub(crate) fn new(def: Def) -> Self {
        Self {
            def,
            checks: Vec::new(),
            last_check: None,
            bag: Bag::default(),
            error: None,
            parent: None,
        }
    }

    /// Attaches a check. A bound replaces an existing bound of the same
    /// slot only if it is tighter; a length always replaces.
    pub(crate) fn add_check(&mut self, check: Check) {
        if let Some(slot) = check.kind.slot() {
            if let Some(i) = self.checks.iter().position(|c| c.kind.slot() == Some(slot)) {
                if check.kind.tighter_than(&self.checks[i].kind) {
                    self.checks[i] = check;
                }
                self.last_check = Some(i);
                self.bag = Bag::from_checks(&self.checks);
                return;
            }
        }
        self.checks.push(check);
        self.last_check = Some(self.checks.len() - 1);
        self.bag = Bag::from_checks(&self.checks);
    }
}

// ============================================================================
// SCHEMA HANDLE
// ============================================================================

/// Identity of a schema node. Two handles are the same schema only if they
/// point at the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(usize);

/// A shared handle to an immutable schema node.
#[derive(Clone)]
pub struct Schema(pub(crate) Arc<Node>);

impl Schema {
    pub(crate) fn from_def(def: Def) -> Self {
        Self(Arc::new(Node::new(def)))
    }

    pub(crate) fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.0
    }

    pub(crate) fn def(&self) -> &Def {
        &self.0.def
    }

    /// Returns the node's identity.
    #[must_use]
    pub fn id(&self) -> SchemaId {
        SchemaId(Arc::as_ptr(&self.0) as usize)
    }

    /// Returns true if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the kind name of the node, e.g. `"string"` or `"object"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.0.def.name()
    }

    /// Returns the effective constraints of the node.
    #[must_use]
    pub fn bag(&self) -> &Bag {
        &self.0.bag
    }

    /// A new node with the same definition, changed by `f`. The clone
    /// drops the parent link, since its checks may now differ.
    pub(crate) fn derive(&self, f: impl FnOnce(&mut Node)) -> Self {
        let mut node = (*self.0).clone();
        node.parent = None;
        f(&mut node);
        Self::from_node(node)
    }

    pub(crate) fn with_check(&self, check: Check) -> Self {
        self.derive(|node| node.add_check(check))
    }

    /// True if the schema accepts an absent input.
    pub(crate) fn optin(&self) -> bool {
        match &self.0.def {
            Def::Optional(_)
            | Def::Undefined
            | Def::Any
            | Def::Unknown
            | Def::Default { .. }
            | Def::Prefault { .. } => true,
            Def::Nullable(inner)
            | Def::Catch { inner, .. }
            | Def::Readonly(inner)
            | Def::Brand(inner)
            | Def::Pipe { input: inner, .. } => inner.optin(),
            Def::Lazy(lazy) => lazy.resolve().is_some_and(|inner| inner.optin()),
            _ => false,
        }
    }

    /// True if the schema may produce an absent output.
    pub(crate) fn optout(&self) -> bool {
        match &self.0.def {
            Def::Optional(_) | Def::Undefined | Def::Any | Def::Unknown => true,
            Def::Nullable(inner)
            | Def::Catch { inner, .. }
            | Def::Readonly(inner)
            | Def::Brand(inner)
            | Def::Pipe { output: inner, .. } => inner.optout(),
            Def::Lazy(lazy) => lazy.resolve().is_some_and(|inner| inner.optout()),
            _ => false,
        }
    }

    /// Validates `input`, recording issues on `ctx`.
    ///
    /// The node's structural check runs first; its checks run only if no
    /// non-continuable issue was recorded by it.
    pub(crate) fn run<'a>(
        &'a self,
        input: Value,
        ctx: &'a mut ParseContext,
    ) -> BoxFuture<'a, Result<Value, SchemaError>> {
        async move {
            let mark = ctx.mark();
            let value = self.run_def(input, ctx).await?;
            if self.0.checks.is_empty() || ctx.aborted_since(mark) {
                return Ok(value);
            }
            run_checks(&self.0.checks, value, ctx, mark).await
        }
        .boxed()
    }

    async fn run_def(&self, input: Value, ctx: &mut ParseContext) -> Result<Value, SchemaError> {
        let node = &*self.0;
        let err = node.error.as_ref();
        match &node.def {
            Def::String { coerce } => Ok(primitive::parse_string(*coerce, input, ctx, err)),
            Def::Number {
                coerce,
                allow_infinite,
            } => Ok(primitive::parse_number(*coerce, *allow_infinite, input, ctx, err)),
            Def::BigInt { coerce } => Ok(primitive::parse_bigint(*coerce, input, ctx, err)),
            Def::Boolean { coerce } => Ok(primitive::parse_boolean(*coerce, input, ctx, err)),
            Def::Date { coerce } => Ok(primitive::parse_date(*coerce, input, ctx, err)),
            Def::Literal(values) | Def::Enum(values) => {
                Ok(literal::parse(values, input, ctx, err))
            }
            Def::Symbol
            | Def::Undefined
            | Def::Null
            | Def::Any
            | Def::Unknown
            | Def::Never
            | Def::Void
            | Def::NaN
            | Def::Custom => Ok(primitive::parse_special(&node.def, input, ctx, err)),
            Def::Object(def) => def.parse(input, ctx, err).await,
            Def::Array(element) => sequence::parse_array(element, input, ctx, err).await,
            Def::Tuple { items, rest } => {
                sequence::parse_tuple(items, rest.as_ref(), input, ctx, err).await
            }
            Def::Union(def) => def.parse(input, ctx, err).await,
            Def::DiscriminatedUnion(def) => def.parse(input, ctx, err).await,
            Def::Record(def) => def.parse(input, ctx, err).await,
            Def::Map { key, value } => map::parse_map(key, value, input, ctx, err).await,
            Def::Set(element) => map::parse_set(element, input, ctx, err).await,
            Def::Intersection(left, right) => intersection::parse(left, right, input, ctx).await,
            Def::Optional(inner) => modifiers::parse_optional(inner, input, ctx).await,
            Def::Nullable(inner) => modifiers::parse_nullable(inner, input, ctx).await,
            Def::Default { inner, fallback } => {
                modifiers::parse_default(inner, fallback, input, ctx).await
            }
            Def::Prefault { inner, fallback } => {
                modifiers::parse_prefault(inner, fallback, input, ctx).await
            }
            Def::Catch { inner, fallback } => {
                modifiers::parse_catch(inner, fallback, input, ctx).await
            }
            Def::Readonly(inner) => modifiers::parse_readonly(inner, input, ctx).await,
            Def::NonOptional(inner) => modifiers::parse_nonoptional(inner, input, ctx, err).await,
            Def::Brand(inner) => inner.run(input, ctx).await,
            Def::Pipe { input: left, output } => pipe::parse_pipe(left, output, input, ctx).await,
            Def::Transform(f) => pipe::parse_transform(f, input, ctx).await,
            Def::Lazy(lazy) => match lazy.resolve() {
                Some(inner) => inner.run(input, ctx).await,
                None => Err(SchemaError::DetachedRecursion),
            },
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind())
            .field("checks", &self.0.checks)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Schema {}

// ============================================================================
// CHILD EVALUATION
// ============================================================================

/// One child evaluation: a schema, its input and the context it records
/// into.
pub(crate) struct Job<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) value: Value,
    pub(crate) ctx: ParseContext,
}

impl<'a> Job<'a> {
    pub(crate) fn new(schema: &'a Schema, value: Value, ctx: ParseContext) -> Self {
        Self { schema, value, ctx }
    }
}

async fn run_job(job: Job<'_>) -> Result<(Value, ParseContext), SchemaError> {
    let Job {
        schema,
        value,
        mut ctx,
    } = job;
    let value = schema.run(value, &mut ctx).await?;
    Ok((value, ctx))
}

/// Evaluates jobs, concurrently when `concurrent` is set. Results come back
/// in job order either way, so merged issues stay in canonical order.
pub(crate) async fn run_jobs(
    jobs: Vec<Job<'_>>,
    concurrent: bool,
) -> Result<Vec<(Value, ParseContext)>, SchemaError> {
    if concurrent {
        join_all(jobs.into_iter().map(run_job)).await.into_iter().collect()
    } else {
        let mut out = Vec::with_capacity(jobs.len());
        for job in jobs {
            out.push(run_job(job).await?);
        }
        Ok(out)
    }
}

// ============================================================================
// SCHEMA TYPE
// ============================================================================

/// The surface shared by [`Schema`] and the typed handles.
///
/// Methods that only attach checks or metadata return `Self`, so typed
/// builders stay available after them. Wrapping methods return a plain
/// [`Schema`].
///
/// ```rust,ignore
/// use sieve_schema::prelude::*;
///
/// let name = string().min(1).refine(|v| v.as_str() != Some("root"), "reserved");
/// assert!(name.safe_parse("alice")?.is_success());
/// ```
pub trait SchemaType: Clone + Into<Schema> + Send + Sync {
    /// Borrows the underlying handle.
    fn as_schema(&self) -> &Schema;

    /// Rebuilds the handle around a node of the same kind.
    #[doc(hidden)]
    fn from_schema(schema: Schema) -> Self;

    /// Returns a plain handle to the same node.
    fn to_schema(&self) -> Schema {
        self.as_schema().clone()
    }

    // ==================== Parsing ====================

    /// Parses without throwing for invalid data.
    fn safe_parse(&self, input: impl Into<Value>) -> Result<ParseResult, SchemaError> {
        parse::run_sync(self.as_schema(), input.into(), Arc::new(ParseOptions::default()))
    }

    fn safe_parse_with(
        &self,
        input: impl Into<Value>,
        options: ParseOptions,
    ) -> Result<ParseResult, SchemaError> {
        parse::run_sync(self.as_schema(), input.into(), Arc::new(options))
    }

    /// Parses, returning the output or every issue found.
    fn parse(&self, input: impl Into<Value>) -> Result<Value, ParseError> {
        Ok(self.safe_parse(input)?.into_result()?)
    }

    fn parse_with(&self, input: impl Into<Value>, options: ParseOptions) -> Result<Value, ParseError> {
        Ok(self.safe_parse_with(input, options)?.into_result()?)
    }

    /// Async counterpart of [`safe_parse`](Self::safe_parse); permits async
    /// refinements and transforms.
    fn safe_parse_async(
        &self,
        input: impl Into<Value>,
    ) -> impl Future<Output = Result<ParseResult, SchemaError>> + Send {
        self.safe_parse_async_with(input, ParseOptions::default())
    }

    fn safe_parse_async_with(
        &self,
        input: impl Into<Value>,
        options: ParseOptions,
    ) -> impl Future<Output = Result<ParseResult, SchemaError>> + Send {
        let schema = self.to_schema();
        let input = input.into();
        async move { parse::run_async(&schema, input, Arc::new(options)).await }
    }

    fn parse_async(
        &self,
        input: impl Into<Value>,
    ) -> impl Future<Output = Result<Value, ParseError>> + Send {
        let fut = self.safe_parse_async(input);
        async move { Ok(fut.await?.into_result()?) }
    }

    // ==================== Refinements ====================

    /// Adds a predicate check. A failure records a `custom` issue.
    #[must_use = "builder methods must be chained or built"]
    fn refine<F>(&self, predicate: F, params: impl Into<Params>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let kind = CheckKind::Refine(Refinement::Sync(Arc::new(predicate)));
        Self::from_schema(self.as_schema().with_check(Check::new(kind, params.into())))
    }

    /// Adds an async predicate check; requires an async parse.
    #[must_use = "builder methods must be chained or built"]
    fn refine_async<F, Fut>(&self, predicate: F, params: impl Into<Params>) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let f = Arc::new(move |value: Value| predicate(value).boxed());
        let kind = CheckKind::Refine(Refinement::Async(f));
        Self::from_schema(self.as_schema().with_check(Check::new(kind, params.into())))
    }

    /// Adds a check that may raise any number of issues.
    #[must_use = "builder methods must be chained or built"]
    fn super_refine<F>(&self, body: F) -> Self
    where
        F: Fn(&Value, &RefinementCtx) + Send + Sync + 'static,
    {
        let kind = CheckKind::SuperRefine(SuperRefinement::Sync(Arc::new(body)));
        Self::from_schema(self.as_schema().with_check(Check::plain(kind)))
    }

    #[must_use = "builder methods must be chained or built"]
    fn super_refine_async<F, Fut>(&self, body: F) -> Self
    where
        F: Fn(Value, RefinementCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let f = Arc::new(move |value: Value, rctx: RefinementCtx| body(value, rctx).boxed());
        let kind = CheckKind::SuperRefine(SuperRefinement::Async(f));
        Self::from_schema(self.as_schema().with_check(Check::plain(kind)))
    }

    /// Replaces the params of the most recently attached check. On a node
    /// without checks, sets the node's structural message instead.
    #[must_use = "builder methods must be chained or built"]
    fn with_params(&self, params: impl Into<Params>) -> Self {
        let params = params.into();
        Self::from_schema(self.as_schema().derive(|node| match node.last_check {
            Some(i) => node.checks[i].params = params,
            None => node.error = params.message,
        }))
    }

    /// Sets the message for the node's structural issues.
    #[must_use = "builder methods must be chained or built"]
    fn error(&self, message: impl Into<ErrorMessage>) -> Self {
        let message = message.into();
        Self::from_schema(self.as_schema().derive(|node| node.error = Some(message)))
    }

    // ==================== Metadata ====================

    /// Returns a copy registered in the global registry with a description.
    #[must_use = "builder methods must be chained or built"]
    fn describe(&self, description: impl Into<String>) -> Self {
        self.meta(Meta::new().description(description))
    }

    /// Returns a copy registered in the global registry with `meta`.
    #[must_use = "builder methods must be chained or built"]
    fn meta(&self, meta: Meta) -> Self {
        let parent = self.to_schema();
        let copy = parent.derive(|node| node.parent = Some(parent.clone()));
        registry::global().add(&copy, meta);
        Self::from_schema(copy)
    }

    /// Returns the metadata the global registry holds for this node.
    fn metadata(&self) -> Option<Meta> {
        registry::global().get(self.as_schema())
    }

    fn description(&self) -> Option<String> {
        self.metadata().and_then(|meta| meta.description)
    }

    // ==================== Wrappers ====================

    /// Accepts `undefined`.
    fn optional(&self) -> Schema {
        Schema::from_def(Def::Optional(self.to_schema()))
    }

    /// Accepts `null`.
    fn nullable(&self) -> Schema {
        Schema::from_def(Def::Nullable(self.to_schema()))
    }

    /// Accepts `null` and `undefined`.
    fn nullish(&self) -> Schema {
        self.nullable().optional()
    }

    /// Substitutes `value` for `undefined`. The substitute is validated
    /// against the output side of this schema.
    fn default(&self, value: impl Into<Value>) -> Schema {
        Schema::from_def(Def::Default {
            inner: self.to_schema(),
            fallback: Fallback::Value(value.into()),
        })
    }

    fn default_with<F>(&self, f: F) -> Schema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Schema::from_def(Def::Default {
            inner: self.to_schema(),
            fallback: Fallback::Fn(Arc::new(f)),
        })
    }

    /// Substitutes `value` for `undefined` before parsing, so the
    /// substitute goes through every check and transform.
    fn prefault(&self, value: impl Into<Value>) -> Schema {
        Schema::from_def(Def::Prefault {
            inner: self.to_schema(),
            fallback: Fallback::Value(value.into()),
        })
    }

    fn prefault_with<F>(&self, f: F) -> Schema
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Schema::from_def(Def::Prefault {
            inner: self.to_schema(),
            fallback: Fallback::Fn(Arc::new(f)),
        })
    }

    /// Replaces any failure with `value`, dropping the issues.
    fn catch(&self, value: impl Into<Value>) -> Schema {
        Schema::from_def(Def::Catch {
            inner: self.to_schema(),
            fallback: CatchValue::Value(value.into()),
        })
    }

    /// Replaces any failure with the result of `f`, which sees the dropped
    /// issues and the original input.
    fn catch_with<F>(&self, f: F) -> Schema
    where
        F: Fn(&CatchContext) -> Value + Send + Sync + 'static,
    {
        Schema::from_def(Def::Catch {
            inner: self.to_schema(),
            fallback: CatchValue::Fn(Arc::new(f)),
        })
    }

    /// Freezes the output container.
    fn readonly(&self) -> Schema {
        Schema::from_def(Def::Readonly(self.to_schema()))
    }

    /// Rejects an `undefined` output.
    fn nonoptional(&self) -> Schema {
        Schema::from_def(Def::NonOptional(self.to_schema()))
    }

    /// Marks the schema as nominal. Has no runtime effect.
    fn brand(&self) -> Schema {
        Schema::from_def(Def::Brand(self.to_schema()))
    }

    // ==================== Pipeline ====================

    /// Maps the validated value. Issues raised on the context fail the
    /// parse.
    fn transform<F>(&self, f: F) -> Schema
    where
        F: Fn(Value, &RefinementCtx) -> Value + Send + Sync + 'static,
    {
        let step = Schema::from_def(Def::Transform(TransformFn::Sync(Arc::new(f))));
        self.pipe(step)
    }

    /// Maps the validated value asynchronously; requires an async parse.
    fn transform_async<F, Fut>(&self, f: F) -> Schema
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        let f = Arc::new(move |value: Value| f(value).boxed());
        let step = Schema::from_def(Def::Transform(TransformFn::Async(f)));
        self.pipe(step)
    }

    /// Feeds this schema's output into `next`.
    fn pipe(&self, next: impl Into<Schema>) -> Schema {
        Schema::from_def(Def::Pipe {
            input: self.to_schema(),
            output: next.into(),
        })
    }

    // ==================== Composition ====================

    /// An array of this schema.
    fn array(&self) -> ArraySchema {
        crate::combinators::array(self.to_schema())
    }

    /// A union of this schema and `other`.
    fn or(&self, other: impl Into<Schema>) -> Schema {
        crate::combinators::union([self.to_schema(), other.into()])
    }

    /// An intersection of this schema and `other`.
    fn and(&self, other: impl Into<Schema>) -> Schema {
        intersection(self.to_schema(), other.into())
    }

    // ==================== Introspection ====================

    /// True if the schema accepts `undefined`.
    fn is_optional(&self) -> bool {
        matches!(self.safe_parse(Value::Undefined), Ok(ParseResult::Success(_)))
    }

    /// True if the schema accepts `null`.
    fn is_nullable(&self) -> bool {
        matches!(self.safe_parse(Value::Null), Ok(ParseResult::Success(_)))
    }
}

impl SchemaType for Schema {
    fn as_schema(&self) -> &Schema {
        self
    }

    fn from_schema(schema: Schema) -> Self {
        schema
    }
}
