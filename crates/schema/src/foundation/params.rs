//! Custom messages and per-check parameters

use std::fmt;
use std::sync::Arc;

use sieve_value::PathSegment;

use crate::foundation::issue::PendingIssue;

/// Maps an issue in progress to a custom message. Returning `None` defers
/// to the next message source.
pub type ErrorMap = Arc<dyn Fn(&PendingIssue<'_>) -> Option<String> + Send + Sync>;

/// A custom message: fixed text or an error map.
#[derive(Clone)]
pub enum ErrorMessage {
    Text(String),
    Map(ErrorMap),
}

impl ErrorMessage {
    /// Builds a message from an error map function.
    pub fn map<F>(f: F) -> Self
    where
        F: Fn(&PendingIssue<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self::Map(Arc::new(f))
    }

    /// Resolves the message for an issue.
    #[must_use]
    pub fn resolve(&self, issue: &PendingIssue<'_>) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Map(map) => map(issue),
        }
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Map(_) => f.write_str("Map(<fn>)"),
        }
    }
}

impl From<&str> for ErrorMessage {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ErrorMessage {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parameters attached to a single check.
///
/// `&str` and `String` convert into a `Params` carrying just a message, so
/// `schema.refine(pred, "must be even")` reads naturally.
///
/// ```rust,ignore
/// let p = Params::new().message("too short").abort();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub(crate) message: Option<ErrorMessage>,
    pub(crate) abort: bool,
    pub(crate) path: Vec<PathSegment>,
    pub(crate) params: Option<serde_json::Value>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the custom message.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Makes a failure of this check skip the remaining checks on the node.
    #[must_use = "builder methods must be chained or built"]
    pub fn abort(mut self) -> Self {
        self.abort = true;
        self
    }

    /// Reports refinement failures at a sub-path of the current location.
    #[must_use = "builder methods must be chained or built"]
    pub fn path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches free-form params to `custom` issues.
    #[must_use = "builder methods must be chained or built"]
    pub fn params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }
}

impl From<&str> for Params {
    fn from(value: &str) -> Self {
        Self::new().message(value)
    }
}

impl From<String> for Params {
    fn from(value: String) -> Self {
        Self::new().message(value)
    }
}

impl From<ErrorMessage> for Params {
    fn from(value: ErrorMessage) -> Self {
        Self::new().message(value)
    }
}
