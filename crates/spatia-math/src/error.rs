//! Error types for math value access.

use thiserror::Error;

/// Errors raised by checked accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Component, row or column index outside the valid range.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of valid indices.
        len: usize,
    },
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;
