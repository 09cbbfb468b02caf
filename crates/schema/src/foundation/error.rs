//! Error types
//!
//! Two families:
//!
//! - [`ValidationError`]: the data did not match. Carries the ordered issue
//!   list produced by one parse.
//! - [`SchemaError`]: the schema itself is misconfigured or was driven
//!   through the wrong entry point. Never produced by bad data alone.
//!
//! [`ParseError`] is what `parse`/`parse_async` return and wraps either.

use std::fmt;

use sieve_value::PathSegment;

use crate::foundation::issue::Issue;

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// A configuration error raised by schema construction or evaluation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// An async refinement or transform was reached from a sync entry
    /// point.
    #[error("encountered an async refinement or transform during synchronous parse; use parse_async")]
    AsyncInSync,

    /// Both sides of an intersection produced values that cannot be merged.
    #[error("unmergeable intersection at path {}", sieve_value::format_path(.path))]
    UnmergeableIntersection { path: Vec<PathSegment> },

    /// A discriminated union option has no usable discriminator value.
    #[error("invalid discriminated union option at index {index}: {reason}")]
    InvalidDiscriminatedUnion { index: usize, reason: String },

    /// A `recursive` self reference outlived the schema it points to.
    #[error("recursive schema reference used after its schema was dropped")]
    DetachedRecursion,

    /// Two discriminated union options share a discriminator value.
    #[error("duplicate discriminator value {value} for key {discriminator:?}")]
    DuplicateDiscriminator {
        discriminator: String,
        value: String,
    },
}

impl SchemaError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AsyncInSync => "SCHEMA_ASYNC_IN_SYNC",
            Self::UnmergeableIntersection { .. } => "SCHEMA_UNMERGEABLE_INTERSECTION",
            Self::InvalidDiscriminatedUnion { .. } => "SCHEMA_INVALID_DISCRIMINATED_UNION",
            Self::DuplicateDiscriminator { .. } => "SCHEMA_DUPLICATE_DISCRIMINATOR",
            Self::DetachedRecursion => "SCHEMA_DETACHED_RECURSION",
        }
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The structured failure of a parse: every issue found, in canonical
/// traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// Wraps an issue list.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Returns the issues.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the error and returns the issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Returns the number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        "VALIDATION_FAILED"
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl serde::Serialize for ValidationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.issues.serialize(serializer)
    }
}

impl FromIterator<Issue> for ValidationError {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Failure of a throwing `parse`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ParseError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid(e) => e.code(),
            Self::Schema(e) => e.code(),
        }
    }

    /// Returns the validation error, if this is a data failure.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(e) => Some(e),
            Self::Schema(_) => None,
        }
    }

    /// Returns the issues of a data failure; empty for schema errors.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        self.as_validation().map_or(&[], ValidationError::issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::issue::IssueKind;

    #[test]
    fn display_numbers_issues() {
        let err = ValidationError::new(vec![Issue {
            kind: IssueKind::custom(),
            path: vec![PathSegment::from("a")],
            message: "Invalid input".into(),
            input: None,
            continuable: true,
        }]);
        assert_eq!(
            err.to_string(),
            "Validation failed with 1 issue(s):\n  1. [a] custom: Invalid input\n"
        );
    }

    #[test]
    fn schema_error_codes() {
        assert_eq!(SchemaError::AsyncInSync.code(), "SCHEMA_ASYNC_IN_SYNC");
        let err = SchemaError::UnmergeableIntersection {
            path: vec![PathSegment::from("a"), PathSegment::Index(1)],
        };
        assert_eq!(err.to_string(), "unmergeable intersection at path a[1]");
        assert_eq!(ParseError::from(err).code(), "SCHEMA_UNMERGEABLE_INTERSECTION");
    }
}
