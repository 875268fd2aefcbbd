#![warn(missing_docs)]

//! Math types for the spatia geometric query toolkit.
//!
//! Thin aliases over nalgebra for the value types the query kernels consume
//! (points, vectors, 3x3/4x4 matrices, unit quaternions), plus axis-aligned
//! boxes, tolerance constants and bounds-checked component access.

mod bbox;
mod error;
mod index;

pub use bbox::{Aabb2, Aabb3};
pub use error::{MathError, Result};
pub use index::{column, component, row};

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A homogeneous 4-vector.
pub type Vec4 = Vector4<f64>;

/// A point in 2D space.
pub type Point2 = nalgebra::Point2<f64>;

/// A 3x3 matrix.
pub type Mat3 = Matrix3<f64>;

/// A 4x4 matrix (projection, view, or their product).
pub type Mat4 = Matrix4<f64>;

/// A unit quaternion representing a rotation.
pub type Quat = nalgebra::UnitQuaternion<f64>;

/// Tolerance constants for numeric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-6 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-6,
    };

    /// Check if a scalar is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two rotations are the same within the angular tolerance.
    ///
    /// `q` and `-q` describe the same rotation and compare equal.
    pub fn rotations_equal(&self, a: &Quat, b: &Quat) -> bool {
        a.angle_to(b) < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
