//! Error types for polygon set construction.

use thiserror::Error;

/// Errors that can occur while building a [`PolygonSetLocator`](crate::PolygonSetLocator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// Vertex count exceeds what the buffer holds.
    #[error("vertex count {count} exceeds buffer of {available} vertices")]
    OutOfRange {
        /// Requested vertex count.
        count: usize,
        /// Complete (x, y) pairs in the buffer.
        available: usize,
    },

    /// Polygon start indices must be strictly increasing within `1..count`.
    #[error("invalid start {start} for polygon {polygon}: {reason}")]
    InvalidPolygonStart {
        /// Index of the polygon whose start is invalid.
        polygon: usize,
        /// The rejected vertex index.
        start: usize,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Result type for polygon operations.
pub type Result<T> = std::result::Result<T, LocatorError>;
