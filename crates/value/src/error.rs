//! Value error types

use crate::kind::ValueKind;

/// Errors raised by value operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A mutation was attempted on a frozen container.
    #[error("cannot mutate frozen {kind}")]
    Frozen { kind: ValueKind },

    /// An array index was past the end of the array.
    #[error("index {index} out of bounds (length: {length})")]
    IndexOutOfBounds { index: usize, length: usize },
}

impl ValueError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Frozen { .. } => "VALUE_FROZEN",
            Self::IndexOutOfBounds { .. } => "VALUE_INDEX_OUT_OF_BOUNDS",
        }
    }
}

/// Result alias for value operations.
pub type ValueResult<T> = Result<T, ValueError>;
