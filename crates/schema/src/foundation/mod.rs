//! Core model shared by every schema kind: the node and walker, checks,
//! issues, errors and per-parse state.

pub(crate) mod checks;
pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod issue;
pub(crate) mod params;
pub(crate) mod schema;

pub use checks::{Bag, MAX_SAFE_INTEGER, RefinementCtx, RefinementIssue};
pub use context::{Io, ParseContext, ParseMode};
pub use error::{ParseError, SchemaError, ValidationError};
pub use issue::{Expected, Format, Issue, IssueKind, Limit, Origin, PendingIssue};
pub use params::{ErrorMap, ErrorMessage, Params};
pub use schema::{Schema, SchemaId, SchemaType};

pub(crate) use schema::{CatchValue, Def, Fallback, Job, TransformFn, run_jobs};
