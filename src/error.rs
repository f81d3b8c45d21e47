//! Error kinds for the matching core.
//!
//! "No match" is never an error: an empty [`crate::tile::TileSet`] is a
//! normal, successful outcome. These variants are for inputs the core
//! cannot act on at all.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GstError {
    /// `min_length == 0`, a mark-vector length mismatch, a negative
    /// `similarity_precision`, or similar caller-contract violations.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A token sequence is longer than the implementation's index type
    /// supports.
    #[error("overflow: {0}")]
    Overflow(String),

    /// Allocation failure while servicing a single comparison.
    #[error("resource exhausted: {0}")]
    ResourceExhaustion(String),
}

pub type Result<T> = std::result::Result<T, GstError>;
