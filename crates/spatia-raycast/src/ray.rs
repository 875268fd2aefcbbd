//! Plain ray with the slab test.
//!
//! Reports entry and exit parameters, so it doubles as the reference the
//! slope test is checked against.

use spatia_math::{Aabb3, Point3, Vec3};

/// Half-line `origin + t * direction`, `t >= 0`, with a unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Point3,
    /// Unit direction.
    pub direction: Vec3,
    /// Per-axis `1 / direction`; infinite on axes the ray does not move along.
    inv_direction: Vec3,
    /// Per-axis: true when the ray moves towards `-inf`.
    negative: [bool; 3],
}

impl Ray {
    /// Ray from `origin` along `direction`, which is normalized here.
    ///
    /// A zero `direction` yields NaN components and a ray that hits nothing.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let direction = direction.normalize();
        let inv_direction = direction.map(|d| 1.0 / d);
        let negative = [
            inv_direction.x < 0.0,
            inv_direction.y < 0.0,
            inv_direction.z < 0.0,
        ];
        Self {
            origin,
            direction,
            inv_direction,
            negative,
        }
    }

    /// Ray starting at `from` and passing through `to`.
    pub fn through(from: Point3, to: Point3) -> Self {
        Self::new(from, to - from)
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Slab intersection with `aabb`.
    ///
    /// Returns the parameter range `(enter, exit)` spent inside the box, with
    /// `enter` clamped to 0 when the origin is already inside, or `None` on a
    /// miss. Axis-parallel rays rely on IEEE infinities.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let mut enter = f64::NEG_INFINITY;
        let mut exit = f64::INFINITY;
        for axis in 0..3 {
            let (near, far) = if self.negative[axis] {
                (aabb.max[axis], aabb.min[axis])
            } else {
                (aabb.min[axis], aabb.max[axis])
            };
            let o = self.origin[axis];
            let inv = self.inv_direction[axis];
            enter = enter.max((near - o) * inv);
            exit = exit.min((far - o) * inv);
        }
        (exit >= enter && exit >= 0.0).then(|| (enter.max(0.0), exit))
    }
}
