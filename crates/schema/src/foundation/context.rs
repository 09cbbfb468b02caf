//! Per-parse state
//!
//! A [`ParseContext`] is created for each top-level parse and threaded by
//! mutable reference through the walk. Composite nodes hand each child its
//! own context (see [`ParseContext::child`]) so children can be evaluated
//! concurrently; the parent then merges the child issues back in canonical
//! order.

use std::sync::Arc;

use sieve_value::{PathSegment, Value};

use crate::config::{self, ParseOptions};
use crate::foundation::error::SchemaError;
use crate::foundation::issue::{Issue, IssueKind, PendingIssue};
use crate::foundation::params::ErrorMessage;
use crate::locale;

/// Whether async refinements and transforms may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Sync,
    Async,
}

/// Which side of pipes and transforms is being evaluated.
///
/// `Output` is used to validate substituted defaults: a pipe only runs its
/// output schema and transforms pass values through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Io {
    Input,
    Output,
}

/// Mutable state of one parse invocation.
#[derive(Debug)]
pub struct ParseContext {
    path: Vec<PathSegment>,
    issues: Vec<Issue>,
    mode: ParseMode,
    io: Io,
    options: Arc<ParseOptions>,
}

impl ParseContext {
    /// Creates a root context.
    #[must_use]
    pub fn new(mode: ParseMode, options: Arc<ParseOptions>) -> Self {
        Self {
            path: Vec::new(),
            issues: Vec::new(),
            mode,
            io: Io::Input,
            options,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    #[must_use]
    pub fn io(&self) -> Io {
        self.io
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Returns the current location.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Returns every issue recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub(crate) fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Fails with [`SchemaError::AsyncInSync`] when called in sync mode.
    pub(crate) fn require_async(&self) -> Result<(), SchemaError> {
        match self.mode {
            ParseMode::Async => Ok(()),
            ParseMode::Sync => Err(SchemaError::AsyncInSync),
        }
    }

    /// True when sibling branches may be evaluated concurrently.
    pub(crate) fn concurrent(&self) -> bool {
        self.mode == ParseMode::Async && self.options.concurrent
    }

    pub(crate) fn set_io(&mut self, io: Io) -> Io {
        std::mem::replace(&mut self.io, io)
    }

    // ==================== Children ====================

    /// A context for a child value, located at `segment` below this one.
    pub(crate) fn child(&self, segment: Option<PathSegment>) -> Self {
        let mut path = self.path.clone();
        path.extend(segment);
        Self {
            path,
            issues: Vec::new(),
            mode: self.mode,
            io: self.io,
            options: Arc::clone(&self.options),
        }
    }

    /// A context rooted at the empty path, for union members and map keys
    /// whose issues are reported relative to their parent.
    pub(crate) fn isolated(&self) -> Self {
        Self {
            path: Vec::new(),
            issues: Vec::new(),
            mode: self.mode,
            io: self.io,
            options: Arc::clone(&self.options),
        }
    }

    /// Appends a child's issues. Child paths are already absolute.
    pub(crate) fn merge(&mut self, child: Self) {
        self.issues.extend(child.issues);
    }

    /// Appends issues recorded relative to this location.
    pub(crate) fn extend_relative(&mut self, issues: Vec<Issue>) {
        let prefix = self.path.clone();
        self.issues
            .extend(issues.into_iter().map(|issue| issue.prefixed(&prefix)));
    }

    // ==================== Abort tracking ====================

    /// Marks the current issue count.
    pub(crate) fn mark(&self) -> usize {
        self.issues.len()
    }

    /// True if any issue was recorded since `mark`.
    pub(crate) fn failed_since(&self, mark: usize) -> bool {
        self.issues.len() > mark
    }

    /// True if a non-continuable issue was recorded since `mark`.
    pub(crate) fn aborted_since(&self, mark: usize) -> bool {
        self.issues
            .get(mark..)
            .is_some_and(|recent| recent.iter().any(|issue| !issue.continuable))
    }

    /// Removes and returns the issues recorded since `mark`.
    pub(crate) fn take_since(&mut self, mark: usize) -> Vec<Issue> {
        if mark >= self.issues.len() {
            return Vec::new();
        }
        self.issues.split_off(mark)
    }

    // ==================== Recording ====================

    /// Records a structural issue at the current path. Structural issues
    /// stop the node's checks.
    pub(crate) fn report(&mut self, kind: IssueKind, input: &Value, custom: Option<&ErrorMessage>) {
        self.push(kind, input, custom, &[], false);
    }

    /// Records an issue at `sub_path` below the current path.
    pub(crate) fn push(
        &mut self,
        kind: IssueKind,
        input: &Value,
        custom: Option<&ErrorMessage>,
        sub_path: &[PathSegment],
        continuable: bool,
    ) {
        let mut path = self.path.clone();
        path.extend_from_slice(sub_path);
        let message = self.resolve_message(&kind, &path, input, custom);
        let input = self.options.report_input.then(|| input.clone());
        self.issues.push(Issue {
            kind,
            path,
            message,
            input,
            continuable,
        });
    }

    fn resolve_message(
        &self,
        kind: &IssueKind,
        path: &[PathSegment],
        input: &Value,
        custom: Option<&ErrorMessage>,
    ) -> String {
        let pending = PendingIssue { kind, path, input };
        custom
            .and_then(|m| m.resolve(&pending))
            .or_else(|| self.options.error.as_ref().and_then(|map| map(&pending)))
            .or_else(|| config::current().error.as_ref().and_then(|map| map(&pending)))
            .unwrap_or_else(|| locale::en(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::issue::Expected;

    fn ctx() -> ParseContext {
        ParseContext::new(ParseMode::Sync, Arc::new(ParseOptions::default()))
    }

    #[test]
    fn child_paths_are_absolute() {
        let root = ctx();
        let a = root.child(Some("a".into()));
        let mut b = a.child(Some(PathSegment::Index(2)));
        b.report(
            IssueKind::invalid_type(Expected::String, &Value::Null),
            &Value::Null,
            None,
        );
        assert_eq!(b.issues()[0].dot_path(), "a[2]");
    }

    #[test]
    fn abort_tracking() {
        let mut c = ctx();
        let mark = c.mark();
        c.push(IssueKind::custom(), &Value::Null, None, &[], true);
        assert!(c.failed_since(mark));
        assert!(!c.aborted_since(mark));
        c.report(IssueKind::custom(), &Value::Null, None);
        assert!(c.aborted_since(mark));
        assert_eq!(c.take_since(mark).len(), 2);
        assert!(!c.failed_since(mark));
    }

    #[test]
    fn custom_message_wins() {
        let mut c = ParseContext::new(
            ParseMode::Sync,
            Arc::new(ParseOptions::new().with_error(|_| Some("from options".into()))),
        );
        c.report(IssueKind::custom(), &Value::Null, Some(&"from check".into()));
        c.report(IssueKind::custom(), &Value::Null, None);
        assert_eq!(c.issues()[0].message, "from check");
        assert_eq!(c.issues()[1].message, "from options");
    }

    #[test]
    fn report_input_attaches_value() {
        let mut c = ParseContext::new(
            ParseMode::Sync,
            Arc::new(ParseOptions::new().with_report_input(true)),
        );
        c.report(IssueKind::custom(), &Value::from(3), None);
        assert_eq!(c.issues()[0].input, Some(Value::from(3)));
    }

    #[test]
    fn sync_mode_rejects_async_work() {
        assert_eq!(ctx().require_async(), Err(SchemaError::AsyncInSync));
    }
}
