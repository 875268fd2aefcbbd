//! Picking rays from a projection-view matrix.
//!
//! The matrix maps world space to clip space with OpenGL conventions
//! (NDC x, y, z in [-1, 1], near plane at z = -1). The eight NDC corners are
//! unprojected once; rays through any viewport position are then bilinear
//! blends of the near and far corners.

use spatia_math::{Mat4, Point3, Vec4};

use crate::error::{RaycastError, Result};
use crate::Ray;

/// One of the four viewport corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// NDC (-1, -1).
    BottomLeft,
    /// NDC (1, -1).
    BottomRight,
    /// NDC (-1, 1).
    TopLeft,
    /// NDC (1, 1).
    TopRight,
}

impl Corner {
    /// All corners in index order.
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeft,
        Corner::TopRight,
    ];

    /// Corner by index (0 = bottom-left, 1 = bottom-right, 2 = top-left, 3 = top-right).
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(RaycastError::OutOfRange { index, len: 4 })
    }

    fn index(self) -> usize {
        self as usize
    }

    fn ndc(self) -> (f64, f64) {
        match self {
            Corner::BottomLeft => (-1.0, -1.0),
            Corner::BottomRight => (1.0, -1.0),
            Corner::TopLeft => (-1.0, 1.0),
            Corner::TopRight => (1.0, 1.0),
        }
    }
}

/// Near/far frustum corners extracted from a projection-view matrix.
#[derive(Debug, Clone)]
pub struct FrustumRays {
    near: [Point3; 4],
    far: [Point3; 4],
    eye: Option<Point3>,
}

impl FrustumRays {
    /// Extract corner points from a combined `projection * view` matrix.
    pub fn from_matrix(projection_view: &Mat4) -> Result<Self> {
        let inv = projection_view
            .try_inverse()
            .ok_or(RaycastError::SingularMatrix)?;

        let mut near = [Point3::origin(); 4];
        let mut far = [Point3::origin(); 4];
        for corner in Corner::ALL {
            let (x, y) = corner.ndc();
            near[corner.index()] = unproject(&inv, x, y, -1.0)?;
            far[corner.index()] = unproject(&inv, x, y, 1.0)?;
        }

        // The eye is the point every row but z maps to zero; orthographic
        // projections put it at infinity.
        let h = inv * Vec4::new(0.0, 0.0, 1.0, 0.0);
        let eye = if h.w.abs() > f64::EPSILON * h.xyz().norm().max(1.0) {
            Some(Point3::from(h.xyz() / h.w))
        } else {
            None
        };

        tracing::debug!(?eye, "frustum corners extracted");
        Ok(Self { near, far, eye })
    }

    /// Ray from the near-plane corner towards the matching far-plane corner.
    pub fn corner_ray(&self, corner: Corner) -> Ray {
        let i = corner.index();
        Ray::through(self.near[i], self.far[i])
    }

    /// Ray through viewport position `(x, y)`, both in `[0, 1]` with `(0, 0)`
    /// at the bottom-left corner.
    pub fn ray_at(&self, x: f64, y: f64) -> Ray {
        let near = blend(&self.near, x, y);
        let far = blend(&self.far, x, y);
        Ray::through(near, far)
    }

    /// Near-plane corner point.
    pub fn near_corner(&self, corner: Corner) -> Point3 {
        self.near[corner.index()]
    }

    /// Far-plane corner point.
    pub fn far_corner(&self, corner: Corner) -> Point3 {
        self.far[corner.index()]
    }

    /// Eye position of a perspective projection, `None` for orthographic.
    pub fn eye(&self) -> Option<Point3> {
        self.eye
    }
}

fn unproject(inv: &Mat4, x: f64, y: f64, z: f64) -> Result<Point3> {
    let v = inv * Vec4::new(x, y, z, 1.0);
    if v.w == 0.0 || !v.w.is_finite() {
        return Err(RaycastError::Unprojectable { x, y, z });
    }
    Ok(Point3::from(v.xyz() / v.w))
}

fn blend(corners: &[Point3; 4], x: f64, y: f64) -> Point3 {
    let bottom = corners[0].coords.lerp(&corners[1].coords, x);
    let top = corners[2].coords.lerp(&corners[3].coords, x);
    Point3::from(bottom.lerp(&top, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spatia_math::Vec3;
    use std::f64::consts::FRAC_PI_2;

    fn perspective() -> Mat4 {
        Mat4::new_perspective(1.0, FRAC_PI_2, 0.1, 100.0)
    }

    #[test]
    fn test_perspective_eye_at_origin() {
        let rays = FrustumRays::from_matrix(&perspective()).unwrap();
        let eye = rays.eye().unwrap();
        assert_relative_eq!(eye, Point3::origin(), epsilon = 1e-9);
    }

    #[test]
    fn test_perspective_center_ray_looks_down_negative_z() {
        let rays = FrustumRays::from_matrix(&perspective()).unwrap();
        let ray = rays.ray_at(0.5, 0.5);
        assert_relative_eq!(ray.direction, -Vec3::z(), epsilon = 1e-9);
        assert_relative_eq!(ray.origin, Point3::new(0.0, 0.0, -0.1), epsilon = 1e-9);
    }

    #[test]
    fn test_perspective_corner_rays_follow_fov() {
        let rays = FrustumRays::from_matrix(&perspective()).unwrap();
        // 90 degree vertical fov with aspect 1: corners at 45 degrees on both axes.
        let d = rays.corner_ray(Corner::TopRight).direction;
        assert!(d.z < 0.0);
        assert_relative_eq!(d.x, -d.z, epsilon = 1e-9);
        assert_relative_eq!(d.y, -d.z, epsilon = 1e-9);

        let d = rays.corner_ray(Corner::BottomLeft).direction;
        assert_relative_eq!(d.x, d.z, epsilon = 1e-9);
        assert_relative_eq!(d.y, d.z, epsilon = 1e-9);
    }

    #[test]
    fn test_translated_view_moves_eye() {
        let view = Mat4::new_translation(&Vec3::new(-1.0, -2.0, -3.0));
        let rays = FrustumRays::from_matrix(&(perspective() * view)).unwrap();
        assert_relative_eq!(rays.eye().unwrap(), Point3::new(1.0, 2.0, 3.0), epsilon = 1e-9);
        assert_relative_eq!(
            rays.near_corner(Corner::TopLeft).z,
            3.0 - 0.1,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            rays.far_corner(Corner::TopLeft).z,
            3.0 - 100.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_orthographic_has_no_eye_and_parallel_rays() {
        let ortho = Mat4::new_orthographic(-2.0, 2.0, -1.0, 1.0, 0.5, 10.0);
        let rays = FrustumRays::from_matrix(&ortho).unwrap();
        assert!(rays.eye().is_none());
        for corner in Corner::ALL {
            assert_relative_eq!(rays.corner_ray(corner).direction, -Vec3::z(), epsilon = 1e-9);
        }
        let ray = rays.corner_ray(Corner::TopRight);
        assert_relative_eq!(ray.origin, Point3::new(2.0, 1.0, -0.5), epsilon = 1e-9);
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let err = FrustumRays::from_matrix(&Mat4::zeros()).unwrap_err();
        assert_eq!(err, RaycastError::SingularMatrix);
    }

    #[test]
    fn test_corner_from_index() {
        assert_eq!(Corner::from_index(3), Ok(Corner::TopRight));
        assert_eq!(
            Corner::from_index(4),
            Err(RaycastError::OutOfRange { index: 4, len: 4 })
        );
    }
}
