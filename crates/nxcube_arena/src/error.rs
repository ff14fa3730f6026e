//! Error types.

use thiserror::Error;

use crate::Handle;

/// Error when an arena grows past the largest index its handle can hold.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("exceeded maximum {type_name} count of {max_index}")]
pub struct HandleOverflow {
    /// Name of the handle type.
    pub type_name: &'static str,
    /// Largest index the handle type can hold.
    pub max_index: usize,
}

impl HandleOverflow {
    /// Constructs a new overflow error for the handle type `H`.
    pub fn new<H: Handle>() -> Self {
        Self {
            type_name: H::TYPE_NAME,
            max_index: H::MAX_INDEX,
        }
    }
}

/// Error when a handle does not refer to an element of an arena.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("{type_name} {index} out of range")]
pub struct HandleOutOfRange {
    /// Name of the handle type.
    pub type_name: &'static str,
    /// Index that was requested.
    pub index: usize,
}
