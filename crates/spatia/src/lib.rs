#![warn(missing_docs)]

//! Geometric query toolkit facade for spatia.
//!
//! Re-exports the query kernels:
//!
//! - [`RaySlopeIntersector`] for repeated ray/box tests against one ray
//! - [`PolygonSetLocator`] for even-odd point containment over polygon sets
//! - [`Svd3Solver`] and [`weighted_average`] for 3x3 SVD and rotation means
//!
//! # Example
//!
//! ```
//! use spatia::{pick, Aabb3, FrustumRays, Mat4, Point3};
//!
//! let projection = Mat4::new_perspective(1.0, std::f64::consts::FRAC_PI_2, 0.1, 100.0);
//! let frustum = FrustumRays::from_matrix(&projection).unwrap();
//! let boxes = [
//!     Aabb3::new(Point3::new(-1.0, -1.0, -6.0), Point3::new(1.0, 1.0, -4.0)),
//!     Aabb3::new(Point3::new(-1.0, -1.0, 4.0), Point3::new(1.0, 1.0, 6.0)),
//! ];
//! let hits: Vec<usize> = pick(&frustum, 0.5, 0.5, &boxes).collect();
//! assert_eq!(hits, [0]);
//! ```

pub use spatia_math;
pub use spatia_polygon;
pub use spatia_raycast;
pub use spatia_svd;

pub use spatia_math::{Aabb2, Aabb3, Mat3, Mat4, Point2, Point3, Quat, Tolerance, Vec3};
pub use spatia_polygon::{LocatorError, PolygonMask, PolygonSetLocator};
pub use spatia_raycast::{
    Corner, FrustumRays, Ray, RaySlopeIntersector, RaycastError, Sign, SlopeClass,
};
pub use spatia_svd::{weighted_average, Svd3, Svd3Solver, SvdError, SvdSettings};

/// Indices of the boxes hit by the picking ray through viewport position
/// `(x, y)` (both in `[0, 1]`, origin at the bottom-left).
///
/// Each box costs one slope test; nothing is sorted by distance.
pub fn pick<'a>(
    frustum: &FrustumRays,
    x: f64,
    y: f64,
    boxes: &'a [Aabb3],
) -> impl Iterator<Item = usize> + 'a {
    let ray = frustum.ray_at(x, y);
    let intersector = RaySlopeIntersector::with_ray(ray.origin, ray.direction);
    boxes
        .iter()
        .enumerate()
        .filter(move |(_, aabb)| intersector.test_aabb(aabb))
        .map(|(i, _)| i)
}
