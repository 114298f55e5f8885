use thiserror::Error;

use crate::value::ValueKind;

/// Stack operation errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StackError {
    /// An operation needed more items than the stack holds.
    #[error("stack underflow (needed {needed}, depth {depth})")]
    Underflow { needed: usize, depth: usize },
    /// A 1-based index that can never address an item (zero).
    #[error("invalid stack index: {0}")]
    InvalidIndex(usize),
    /// Push would exceed the configured maximum depth.
    #[error("stack overflow (max {0})")]
    Overflow(usize),
    /// The located item is not of the requested kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
}

impl StackError {
    /// Underflow helper used when `needed` items were requested.
    pub fn underflow(needed: usize, depth: usize) -> Self {
        StackError::Underflow { needed, depth }
    }
}
