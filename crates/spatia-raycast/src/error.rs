//! Error types for ray construction.

use thiserror::Error;

/// Errors raised while building rays or decoding classifications.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RaycastError {
    /// Index or code outside its valid range.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// Requested index or code.
        index: usize,
        /// Number of valid values.
        len: usize,
    },

    /// Projection-view matrix has no inverse.
    #[error("projection-view matrix is singular")]
    SingularMatrix,

    /// An NDC point maps to infinity under the inverse matrix.
    #[error("NDC point ({x}, {y}, {z}) unprojects to infinity")]
    Unprojectable {
        /// NDC x.
        x: f64,
        /// NDC y.
        y: f64,
        /// NDC z.
        z: f64,
    },
}

/// Result type for raycast operations.
pub type Result<T> = std::result::Result<T, RaycastError>;
