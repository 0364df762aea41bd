//! Error types for structure construction and mutation.
//!
//! Any operation that returns an error has left its structure untouched and
//! produced no plan.

/// Contract violations reported by elements and containers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StructureError {
    /// A required value list was empty, or a pop hit an empty container.
    #[error("{what} requires at least one value")]
    Empty { what: &'static str },

    /// Index outside the range accepted by the operation.
    #[error("{op}: index {index} is out of range for length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: isize,
        len: usize,
    },

    /// A reorder was given something other than a permutation of `0..n`.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    /// Two values have no natural ordering (e.g. a number and a text).
    #[error("values '{left}' and '{right}' cannot be compared")]
    Incomparable { left: String, right: String },
}

pub type Result<T> = std::result::Result<T, StructureError>;
