//! Axis-aligned bounding boxes.

use crate::{Point2, Point3};

/// Box in 3D given by its two extreme corners, as tested by ray queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Corner with the smallest coordinates.
    pub min: Point3,
    /// Corner with the largest coordinates.
    pub max: Point3,
}

impl Aabb3 {
    /// Box spanning `min..=max` on every axis.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }
}

/// Bounds of a 2D point set, grown one point at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Corner with the smallest coordinates.
    pub min: Point2,
    /// Corner with the largest coordinates.
    pub max: Point2,
}

impl Aabb2 {
    /// Inverted bounds that any included point replaces.
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Grow the bounds to cover `(x, y)`.
    pub fn include(&mut self, x: f64, y: f64) {
        self.min.x = self.min.x.min(x);
        self.min.y = self.min.y.min(y);
        self.max.x = self.max.x.max(x);
        self.max.y = self.max.y.max(y);
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// True if `(x, y)` lies strictly outside; the boundary counts as inside.
    pub fn excludes(&self, x: f64, y: f64) -> bool {
        self.max.x < x || self.max.y < y || self.min.x > x || self.min.y > y
    }
}
