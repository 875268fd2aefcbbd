//! Error types for the SVD kernel and rotation averaging.

use thiserror::Error;

/// Errors that can occur during decomposition or averaging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvdError {
    /// A singular value did not converge within the iteration budget.
    #[error("no convergence in {max_iterations} iterations")]
    NonConvergence {
        /// Iteration budget per singular value.
        max_iterations: u32,
    },

    /// No rotations to average.
    #[error("cannot average an empty set of rotations")]
    Empty,

    /// Rotation and weight counts differ.
    #[error("{rotations} rotations but {weights} weights")]
    MismatchedWeights {
        /// Number of rotations.
        rotations: usize,
        /// Number of weights.
        weights: usize,
    },

    /// Weights sum to (nearly) zero.
    #[error("total weight {0} is too close to zero")]
    DegenerateWeights(f64),

    /// Invalid solver settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for SVD operations.
pub type Result<T> = std::result::Result<T, SvdError>;
