//! Errors reported by the list operations and its structural checks.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A structural check on a list failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant `{invariant}` violated on list of length {len}")]
pub struct InvariantViolation {
    invariant: &'static str,
    len: usize,
}

impl InvariantViolation {
    pub(crate) fn new(invariant: &'static str, len: usize) -> Self {
        Self { invariant, len }
    }

    pub fn invariant(&self) -> &'static str {
        self.invariant
    }

    pub fn list_len(&self) -> usize {
        self.len
    }
}
