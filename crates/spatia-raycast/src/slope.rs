//! Ray/AABB overlap tests using ray slopes.
//!
//! The ray is classified once by the sign of each direction component and its
//! pairwise slopes and intercepts are cached, so a box test is a handful of
//! multiply-adds and comparisons with no division and no loop. This is the
//! slope test of Eisemann et al., "Fast Ray/Axis-Aligned Bounding Box Overlap
//! Tests using Ray Slopes" (JGT 2007).
//!
//! An intersector caches per-ray state and mutates it in [`RaySlopeIntersector::set`];
//! threads that test concurrently each own their own instance.

use spatia_math::{Aabb3, Point3, Vec3};

use crate::error::{RaycastError, Result};

/// Sign of one direction component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Strictly negative.
    Neg,
    /// Exactly zero (either sign of zero) or NaN.
    Zero,
    /// Strictly positive.
    Pos,
}

impl Sign {
    /// Classify a component. `-0.0`, `0.0` and NaN are all [`Sign::Zero`].
    #[inline]
    pub fn of(v: f64) -> Self {
        if v > 0.0 {
            Sign::Pos
        } else if v < 0.0 {
            Sign::Neg
        } else {
            Sign::Zero
        }
    }

    fn trit(self) -> u8 {
        match self {
            Sign::Neg => 0,
            Sign::Zero => 1,
            Sign::Pos => 2,
        }
    }

    fn from_trit(t: u8) -> Option<Self> {
        match t {
            0 => Some(Sign::Neg),
            1 => Some(Sign::Zero),
            2 => Some(Sign::Pos),
            _ => None,
        }
    }
}

/// Per-axis sign classification of a ray direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlopeClass {
    /// Sign of the x component.
    pub x: Sign,
    /// Sign of the y component.
    pub y: Sign,
    /// Sign of the z component.
    pub z: Sign,
}

impl SlopeClass {
    /// Classification of a direction vector.
    ///
    /// A component so small that its reciprocal overflows is classified as
    /// [`Sign::Zero`], making the ray parallel to that axis.
    pub fn of(direction: &Vec3) -> Self {
        Self {
            x: Self::axis(direction.x),
            y: Self::axis(direction.y),
            z: Self::axis(direction.z),
        }
    }

    #[inline]
    fn axis(d: f64) -> Sign {
        if (1.0 / d).is_finite() {
            Sign::of(d)
        } else {
            Sign::Zero
        }
    }

    /// Packed code: one trit per axis (`sign + 1`), x in bits 0-1, y in
    /// bits 2-3, z in bits 4-5.
    pub fn code(&self) -> u8 {
        (self.z.trit() << 4) | (self.y.trit() << 2) | self.x.trit()
    }

    /// Decode a packed classification code.
    pub fn from_code(code: u8) -> Result<Self> {
        let decode = |shift: u8| Sign::from_trit((code >> shift) & 0b11);
        match (decode(0), decode(2), decode(4)) {
            (Some(x), Some(y), Some(z)) if code < 64 => Ok(Self { x, y, z }),
            _ => Err(RaycastError::OutOfRange {
                index: code as usize,
                len: 64,
            }),
        }
    }

    /// True for the one direction no box test is defined for: all components zero.
    pub fn is_degenerate(&self) -> bool {
        self.x == Sign::Zero && self.y == Sign::Zero && self.z == Sign::Zero
    }
}

/// Ray with cached slope state for repeated box tests.
///
/// ```
/// use spatia_math::{Point3, Vec3};
/// use spatia_raycast::RaySlopeIntersector;
///
/// let mut ray = RaySlopeIntersector::new();
/// ray.set(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
/// assert!(ray.test(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 1.0, 1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct RaySlopeIntersector {
    origin: Point3,
    direction: Vec3,
    s_xy: f64,
    s_yx: f64,
    s_zy: f64,
    s_yz: f64,
    s_xz: f64,
    s_zx: f64,
    c_xy: f64,
    c_yx: f64,
    c_zy: f64,
    c_yz: f64,
    c_xz: f64,
    c_zx: f64,
    class: SlopeClass,
}

impl RaySlopeIntersector {
    /// An intersector with no ray set. Every test reports no intersection
    /// until [`set`](Self::set) is called.
    pub fn new() -> Self {
        let mut this = Self {
            origin: Point3::origin(),
            direction: Vec3::zeros(),
            s_xy: 0.0,
            s_yx: 0.0,
            s_zy: 0.0,
            s_yz: 0.0,
            s_xz: 0.0,
            s_zx: 0.0,
            c_xy: 0.0,
            c_yx: 0.0,
            c_zy: 0.0,
            c_yz: 0.0,
            c_xz: 0.0,
            c_zx: 0.0,
            class: SlopeClass::of(&Vec3::zeros()),
        };
        this.precompute();
        this
    }

    /// An intersector for the ray `origin + t * direction`, `t >= 0`.
    pub fn with_ray(origin: Point3, direction: Vec3) -> Self {
        let mut this = Self::new();
        this.set(origin, direction);
        this
    }

    /// Replace the ray and recompute all cached slope state.
    ///
    /// The direction does not need to be normalized.
    pub fn set(&mut self, origin: Point3, direction: Vec3) {
        self.origin = origin;
        self.direction = direction;
        self.precompute();
        if self.class.is_degenerate() {
            tracing::trace!(?origin, ?direction, "zero ray direction; box tests will miss");
        }
    }

    /// Origin of the current ray.
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Direction of the current ray, as given to [`set`](Self::set).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Sign classification of the current ray.
    pub fn classification(&self) -> SlopeClass {
        self.class
    }

    fn precompute(&mut self) {
        let d = self.direction;
        let o = self.origin;
        let inv_x = 1.0 / d.x;
        let inv_y = 1.0 / d.y;
        let inv_z = 1.0 / d.z;
        self.s_yx = d.x * inv_y;
        self.s_xy = d.y * inv_x;
        self.s_zy = d.y * inv_z;
        self.s_yz = d.z * inv_y;
        self.s_xz = d.z * inv_x;
        self.s_zx = d.x * inv_z;
        self.c_xy = o.y - self.s_xy * o.x;
        self.c_yx = o.x - self.s_yx * o.y;
        self.c_zy = o.y - self.s_zy * o.z;
        self.c_yz = o.z - self.s_yz * o.y;
        self.c_xz = o.z - self.s_xz * o.x;
        self.c_zx = o.x - self.s_zx * o.z;
        self.class = SlopeClass::of(&d);
    }

    /// Test the current ray against the box `[min, max]`.
    ///
    /// Boxes touched only on their boundary count as hit. A ray with a zero
    /// direction never hits.
    #[inline]
    pub fn test(&self, min: &Point3, max: &Point3) -> bool {
        use Sign::{Neg, Pos, Zero};
        match (self.class.x, self.class.y, self.class.z) {
            (Neg, Neg, Neg) => self.mmm(min, max),
            (Zero, Neg, Neg) => self.omm(min, max),
            (Pos, Neg, Neg) => self.pmm(min, max),
            (Neg, Zero, Neg) => self.mom(min, max),
            (Zero, Zero, Neg) => self.oom(min, max),
            (Pos, Zero, Neg) => self.pom(min, max),
            (Neg, Pos, Neg) => self.mpm(min, max),
            (Zero, Pos, Neg) => self.opm(min, max),
            (Pos, Pos, Neg) => self.ppm(min, max),
            (Neg, Neg, Zero) => self.mmo(min, max),
            (Zero, Neg, Zero) => self.omo(min, max),
            (Pos, Neg, Zero) => self.pmo(min, max),
            (Neg, Zero, Zero) => self.moo(min, max),
            (Pos, Zero, Zero) => self.poo(min, max),
            (Neg, Pos, Zero) => self.mpo(min, max),
            (Zero, Pos, Zero) => self.opo(min, max),
            (Pos, Pos, Zero) => self.ppo(min, max),
            (Neg, Neg, Pos) => self.mmp(min, max),
            (Zero, Neg, Pos) => self.omp(min, max),
            (Pos, Neg, Pos) => self.pmp(min, max),
            (Neg, Zero, Pos) => self.mop(min, max),
            (Zero, Zero, Pos) => self.oop(min, max),
            (Pos, Zero, Pos) => self.pop(min, max),
            (Neg, Pos, Pos) => self.mpp(min, max),
            (Zero, Pos, Pos) => self.opp(min, max),
            (Pos, Pos, Pos) => self.ppp(min, max),
            (Zero, Zero, Zero) => false,
        }
    }

    /// Test the current ray against an [`Aabb3`].
    #[inline]
    pub fn test_aabb(&self, aabb: &Aabb3) -> bool {
        self.test(&aabb.min, &aabb.max)
    }

    // One predicate per non-degenerate classification, named by the sign of
    // x, y, z in that order (m = negative, o = zero, p = positive). Each
    // checks that the origin is not already past the box along every axis,
    // then that the projection of the ray onto each coordinate plane spanned
    // by two moving axes crosses the projected rectangle.

    #[inline]
    fn mmm(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y >= min.y
            && self.origin.z >= min.z
            && self.s_xy * min.x - max.y + self.c_xy <= 0.0
            && self.s_yx * min.y - max.x + self.c_yx <= 0.0
            && self.s_zy * min.z - max.y + self.c_zy <= 0.0
            && self.s_yz * min.y - max.z + self.c_yz <= 0.0
            && self.s_xz * min.x - max.z + self.c_xz <= 0.0
            && self.s_zx * min.z - max.x + self.c_zx <= 0.0
    }

    #[inline]
    fn omm(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.z >= min.z
            && self.s_zy * min.z - max.y + self.c_zy <= 0.0
            && self.s_yz * min.y - max.z + self.c_yz <= 0.0
    }

    #[inline]
    fn pmm(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.z >= min.z
            && self.s_xy * max.x - max.y + self.c_xy <= 0.0
            && self.s_yx * min.y - min.x + self.c_yx >= 0.0
            && self.s_zy * min.z - max.y + self.c_zy <= 0.0
            && self.s_yz * min.y - max.z + self.c_yz <= 0.0
            && self.s_xz * max.x - max.z + self.c_xz <= 0.0
            && self.s_zx * min.z - min.x + self.c_zx >= 0.0
    }

    #[inline]
    fn mom(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.s_xz * min.x - max.z + self.c_xz <= 0.0
            && self.s_zx * min.z - max.x + self.c_zx <= 0.0
    }

    #[inline]
    fn oom(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z >= min.z
    }

    #[inline]
    fn pom(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.s_xz * max.x - max.z + self.c_xz <= 0.0
            && self.s_zx * min.z - min.x + self.c_zx >= 0.0
    }

    #[inline]
    fn mpm(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.s_xy * min.x - min.y + self.c_xy >= 0.0
            && self.s_yx * max.y - max.x + self.c_yx <= 0.0
            && self.s_zy * min.z - min.y + self.c_zy >= 0.0
            && self.s_yz * max.y - max.z + self.c_yz <= 0.0
            && self.s_xz * min.x - max.z + self.c_xz <= 0.0
            && self.s_zx * min.z - max.x + self.c_zx <= 0.0
    }

    #[inline]
    fn opm(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.s_zy * min.z - min.y + self.c_zy >= 0.0
            && self.s_yz * max.y - max.z + self.c_yz <= 0.0
    }

    #[inline]
    fn ppm(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.s_xy * max.x - min.y + self.c_xy >= 0.0
            && self.s_yx * max.y - min.x + self.c_yx >= 0.0
            && self.s_zy * min.z - min.y + self.c_zy >= 0.0
            && self.s_yz * max.y - max.z + self.c_yz <= 0.0
            && self.s_xz * max.x - max.z + self.c_xz <= 0.0
            && self.s_zx * min.z - min.x + self.c_zx >= 0.0
    }

    #[inline]
    fn mmo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y >= min.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
            && self.s_xy * min.x - max.y + self.c_xy <= 0.0
            && self.s_yx * min.y - max.x + self.c_yx <= 0.0
    }

    #[inline]
    fn omo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
    }

    #[inline]
    fn pmo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
            && self.s_xy * max.x - max.y + self.c_xy <= 0.0
            && self.s_yx * min.y - min.x + self.c_yx >= 0.0
    }

    #[inline]
    fn moo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
    }

    #[inline]
    fn poo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
    }

    #[inline]
    fn mpo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
            && self.s_xy * min.x - min.y + self.c_xy >= 0.0
            && self.s_yx * max.y - max.x + self.c_yx <= 0.0
    }

    #[inline]
    fn opo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
    }

    #[inline]
    fn ppo(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y <= max.y
            && self.origin.z >= min.z
            && self.origin.z <= max.z
            && self.s_xy * max.x - min.y + self.c_xy >= 0.0
            && self.s_yx * max.y - min.x + self.c_yx >= 0.0
    }

    #[inline]
    fn mmp(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y >= min.y
            && self.origin.z <= max.z
            && self.s_xy * min.x - max.y + self.c_xy <= 0.0
            && self.s_yx * min.y - max.x + self.c_yx <= 0.0
            && self.s_zy * max.z - max.y + self.c_zy <= 0.0
            && self.s_yz * min.y - min.z + self.c_yz >= 0.0
            && self.s_xz * min.x - min.z + self.c_xz >= 0.0
            && self.s_zx * max.z - max.x + self.c_zx <= 0.0
    }

    #[inline]
    fn omp(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.z <= max.z
            && self.s_zy * max.z - max.y + self.c_zy <= 0.0
            && self.s_yz * min.y - min.z + self.c_yz >= 0.0
    }

    #[inline]
    fn pmp(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.z <= max.z
            && self.s_xy * max.x - max.y + self.c_xy <= 0.0
            && self.s_yx * min.y - min.x + self.c_yx >= 0.0
            && self.s_zy * max.z - max.y + self.c_zy <= 0.0
            && self.s_yz * min.y - min.z + self.c_yz >= 0.0
            && self.s_xz * max.x - min.z + self.c_xz >= 0.0
            && self.s_zx * max.z - min.x + self.c_zx >= 0.0
    }

    #[inline]
    fn mop(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z <= max.z
            && self.s_xz * min.x - min.z + self.c_xz >= 0.0
            && self.s_zx * max.z - max.x + self.c_zx <= 0.0
    }

    #[inline]
    fn oop(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z <= max.z
    }

    #[inline]
    fn pop(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y >= min.y
            && self.origin.y <= max.y
            && self.origin.z <= max.z
            && self.s_xz * max.x - min.z + self.c_xz >= 0.0
            && self.s_zx * max.z - min.x + self.c_zx >= 0.0
    }

    #[inline]
    fn mpp(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.y <= max.y
            && self.origin.z <= max.z
            && self.s_xy * min.x - min.y + self.c_xy >= 0.0
            && self.s_yx * max.y - max.x + self.c_yx <= 0.0
            && self.s_zy * max.z - min.y + self.c_zy >= 0.0
            && self.s_yz * max.y - min.z + self.c_yz >= 0.0
            && self.s_xz * min.x - min.z + self.c_xz >= 0.0
            && self.s_zx * max.z - max.x + self.c_zx <= 0.0
    }

    #[inline]
    fn opp(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x >= min.x
            && self.origin.x <= max.x
            && self.origin.y <= max.y
            && self.origin.z <= max.z
            && self.s_zy * max.z - min.y + self.c_zy >= 0.0
            && self.s_yz * max.y - min.z + self.c_yz >= 0.0
    }

    #[inline]
    fn ppp(&self, min: &Point3, max: &Point3) -> bool {
        self.origin.x <= max.x
            && self.origin.y <= max.y
            && self.origin.z <= max.z
            && self.s_xy * max.x - min.y + self.c_xy >= 0.0
            && self.s_yx * max.y - min.x + self.c_yx >= 0.0
            && self.s_zy * max.z - min.y + self.c_zy >= 0.0
            && self.s_yz * max.y - min.z + self.c_yz >= 0.0
            && self.s_xz * max.x - min.z + self.c_xz >= 0.0
            && self.s_zx * max.z - min.x + self.c_zx >= 0.0
    }
}

impl Default for RaySlopeIntersector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ray;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    fn all_classes() -> Vec<SlopeClass> {
        let signs = [Sign::Neg, Sign::Zero, Sign::Pos];
        let mut classes = Vec::new();
        for z in signs {
            for y in signs {
                for x in signs {
                    let class = SlopeClass { x, y, z };
                    if !class.is_degenerate() {
                        classes.push(class);
                    }
                }
            }
        }
        classes
    }

    fn signed(sign: Sign, magnitude: f64) -> f64 {
        match sign {
            Sign::Neg => -magnitude,
            Sign::Zero => 0.0,
            Sign::Pos => magnitude,
        }
    }

    #[test]
    fn test_sign_of_zero_and_nan() {
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of(f64::NAN), Sign::Zero);
        assert_eq!(Sign::of(-1e-300), Sign::Neg);
        assert_eq!(Sign::of(f64::INFINITY), Sign::Pos);
    }

    #[test]
    fn test_class_codes() {
        let mmm = SlopeClass::of(&Vec3::new(-1.0, -1.0, -1.0));
        let ooo = SlopeClass::of(&Vec3::zeros());
        let ppp = SlopeClass::of(&Vec3::new(1.0, 1.0, 1.0));
        let pmo = SlopeClass::of(&Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(mmm.code(), 0);
        assert_eq!(ooo.code(), 21);
        assert_eq!(ppp.code(), 42);
        assert_eq!(pmo.code(), 0b01_00_10);
        assert!(ooo.is_degenerate());
        assert_eq!(all_classes().len(), 26);
        for class in all_classes() {
            assert_eq!(SlopeClass::from_code(class.code()), Ok(class));
        }
    }

    #[test]
    fn test_class_from_invalid_code() {
        // trit value 3 in the x slot
        assert!(SlopeClass::from_code(0b00_00_11).is_err());
        assert!(SlopeClass::from_code(64).is_err());
        assert_eq!(
            SlopeClass::from_code(200),
            Err(RaycastError::OutOfRange { index: 200, len: 64 })
        );
    }

    #[test]
    fn test_hit_along_x() {
        let ray = RaySlopeIntersector::with_ray(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray.test_aabb(&unit_box()));
    }

    #[test]
    fn test_miss_parallel_offset() {
        let ray = RaySlopeIntersector::with_ray(Point3::new(-5.0, 5.0, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(!ray.test_aabb(&unit_box()));
    }

    #[test]
    fn test_miss_pointing_away() {
        let ray = RaySlopeIntersector::with_ray(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(!ray.test_aabb(&unit_box()));
    }

    #[test]
    fn test_hit_diagonal() {
        let ray = RaySlopeIntersector::with_ray(Point3::new(-3.0, -3.0, -3.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(ray.test_aabb(&unit_box()));
        let ray = RaySlopeIntersector::with_ray(Point3::new(3.0, 3.0, 3.0), Vec3::new(-1.0, -1.0, -1.0));
        assert!(ray.test_aabb(&unit_box()));
    }

    #[test]
    fn test_miss_skew() {
        // Passes y = 0 plane at x = 4, well outside the box.
        let ray = RaySlopeIntersector::with_ray(Point3::new(5.0, 1.0, 0.0), Vec3::new(-1.0, -1.0, 0.0));
        assert!(!ray.test_aabb(&unit_box()));
    }

    #[test]
    fn test_origin_inside_hits_any_direction() {
        let mut ray = RaySlopeIntersector::new();
        for class in all_classes() {
            let d = Vec3::new(signed(class.x, 0.3), signed(class.y, 1.7), signed(class.z, 0.9));
            ray.set(Point3::new(0.1, -0.2, 0.3), d);
            assert!(ray.test_aabb(&unit_box()), "class {:?}", class);
        }
    }

    #[test]
    fn test_unset_and_zero_direction_never_hit() {
        let ray = RaySlopeIntersector::new();
        assert!(!ray.test_aabb(&unit_box()));

        // Origin inside the box still misses: a zero direction is not a ray.
        let ray = RaySlopeIntersector::with_ray(Point3::origin(), Vec3::zeros());
        assert!(ray.classification().is_degenerate());
        assert!(!ray.test_aabb(&unit_box()));
    }

    #[test]
    fn test_subnormal_component_is_axis_parallel() {
        let aabb = Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        for tiny in [1e-310, -1e-310, 1e-320, f64::MIN_POSITIVE / 4.0] {
            let direction = Vec3::new(tiny, 1.0, 0.0);
            let hit = RaySlopeIntersector::with_ray(Point3::new(0.0, -5.0, 0.0), direction);
            assert_eq!(hit.classification().x, Sign::Zero, "{tiny:e}");
            assert!(hit.test_aabb(&aabb), "{tiny:e}");
            let slab = Ray::new(Point3::new(0.0, -5.0, 0.0), direction);
            assert!(slab.intersect_aabb(&aabb).is_some());

            let miss = RaySlopeIntersector::with_ray(Point3::new(2.0, -5.0, 0.0), direction);
            assert!(!miss.test_aabb(&aabb), "{tiny:e}");
        }
        // Small but normal components keep their sign.
        let normal = RaySlopeIntersector::with_ray(Point3::new(0.0, -5.0, 0.0), Vec3::new(1e-300, 1.0, 0.0));
        assert_eq!(normal.classification().x, Sign::Pos);
        assert!(normal.test_aabb(&aabb));
    }

    #[test]
    fn test_set_overwrites_previous_ray() {
        let mut ray = RaySlopeIntersector::with_ray(Point3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(ray.test_aabb(&unit_box()));
        ray.set(Point3::new(-5.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(!ray.test_aabb(&unit_box()));
        assert_eq!(ray.classification().code(), SlopeClass::of(&Vec3::y()).code());
    }

    #[test]
    fn test_repeated_tests_are_stable() {
        let ray = RaySlopeIntersector::with_ray(Point3::new(-4.0, -2.5, 3.0), Vec3::new(1.0, 0.6, -0.7));
        let boxes = [
            unit_box(),
            Aabb3::new(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0)),
        ];
        let first: Vec<bool> = boxes.iter().map(|b| ray.test_aabb(b)).collect();
        let class = ray.classification();
        for _ in 0..10 {
            let again: Vec<bool> = boxes.iter().map(|b| ray.test_aabb(b)).collect();
            assert_eq!(first, again);
        }
        assert_eq!(ray.classification(), class);
    }

    #[test]
    fn test_matches_slab_for_every_classification() {
        let coords = [-3.3, -0.4, 0.7, 2.9];
        let aabb = unit_box();
        let mut ray = RaySlopeIntersector::new();
        let mut hits = 0;
        let mut misses = 0;
        for class in all_classes() {
            let d = Vec3::new(signed(class.x, 0.6), signed(class.y, 1.3), signed(class.z, 0.9));
            for &ox in &coords {
                for &oy in &coords {
                    for &oz in &coords {
                        let origin = Point3::new(ox, oy, oz);
                        ray.set(origin, d);
                        let expected = Ray::new(origin, d).intersect_aabb(&aabb).is_some();
                        assert_eq!(
                            ray.test_aabb(&aabb),
                            expected,
                            "class {:?} origin {:?}",
                            class,
                            origin
                        );
                        if expected {
                            hits += 1;
                        } else {
                            misses += 1;
                        }
                    }
                }
            }
        }
        assert!(hits > 100);
        assert!(misses > 100);
    }
}
