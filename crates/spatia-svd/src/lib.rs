#![warn(missing_docs)]

//! 3x3 singular value decomposition and rotation averaging for spatia.
//!
//! # Example
//!
//! ```
//! use spatia_math::Mat3;
//! use spatia_svd::{Svd3Solver, SvdSettings};
//!
//! let m = Mat3::new(2.0, 0.0, 1.0, 0.0, 3.0, 0.0, 1.0, 0.0, 2.0);
//! let mut solver = Svd3Solver::new();
//! let svd = solver.decompose(&m, &SvdSettings::default())?;
//! assert!((svd.reconstruct() - m).norm() < 1e-12);
//! # Ok::<(), spatia_svd::SvdError>(())
//! ```

mod average;
pub mod error;
mod settings;
mod svd;

pub use average::weighted_average;
pub use error::{Result, SvdError};
pub use settings::SvdSettings;
pub use svd::{Svd3, Svd3Solver};
