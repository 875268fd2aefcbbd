//! Centered interval tree over polygon edge y-extents.
//!
//! Each node owns the edges whose closed y-interval contains its center, kept
//! twice: ascending by start and descending by end. A query below the center
//! scans the first list until starts pass the query, a query above it scans
//! the second until ends fall below it, so only edges straddling the query's
//! y are visited.

use crate::PolygonMask;

/// One polygon edge with its y-extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeInterval {
    /// Smaller y of the two endpoints.
    pub start: f64,
    /// Larger y of the two endpoints.
    pub end: f64,
    /// First vertex index.
    pub a: usize,
    /// Second vertex index.
    pub b: usize,
    /// Owning polygon.
    pub polygon: usize,
}

impl EdgeInterval {
    pub(crate) fn new(vertices: &[f64], a: usize, b: usize, polygon: usize) -> Self {
        let ya = vertices[2 * a + 1];
        let yb = vertices[2 * b + 1];
        Self {
            start: ya.min(yb),
            end: ya.max(yb),
            a,
            b,
            polygon,
        }
    }

    /// Whether the rightward horizontal ray from `(x, y)` crosses this edge.
    ///
    /// An endpoint exactly at height `y` counts as above it, so an edge pair
    /// meeting at such a vertex is crossed once, not twice.
    #[inline]
    pub(crate) fn crosses(&self, vertices: &[f64], x: f64, y: f64) -> bool {
        let xi = vertices[2 * self.a];
        let yi = vertices[2 * self.a + 1];
        let xj = vertices[2 * self.b];
        let yj = vertices[2 * self.b + 1];
        if ((yi < y && yj >= y) || (yj < y && yi >= y)) && (xi >= x || xj >= x) {
            let crossing = xi + (y - yi) / (yj - yi) * (xj - xi);
            crossing >= x
        } else {
            false
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IntervalNode {
    center: f64,
    /// Largest end in a left subtree, smallest start in a right subtree.
    children_min_max: f64,
    left: Option<Box<IntervalNode>>,
    right: Option<Box<IntervalNode>>,
    by_start: Vec<EdgeInterval>,
    by_end: Vec<EdgeInterval>,
}

impl IntervalNode {
    /// Build a subtree over `intervals` split at `center`.
    ///
    /// Intervals entirely below or above the center go to a child; everything
    /// touching the center stays here.
    pub(crate) fn build(intervals: Vec<EdgeInterval>, center: f64) -> Self {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut here = Vec::new();
        let (mut left_min, mut left_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut right_min, mut right_max) = (f64::INFINITY, f64::NEG_INFINITY);

        for ival in intervals {
            if ival.start < center && ival.end < center {
                left_min = left_min.min(ival.start);
                left_max = left_max.max(ival.end);
                left.push(ival);
            } else if ival.start > center && ival.end > center {
                right_min = right_min.min(ival.start);
                right_max = right_max.max(ival.end);
                right.push(ival);
            } else {
                here.push(ival);
            }
        }

        let mut by_start = here.clone();
        by_start.sort_by(|a, b| a.start.total_cmp(&b.start));
        let mut by_end = here;
        by_end.sort_by(|a, b| b.end.total_cmp(&a.end));

        let left = (!left.is_empty()).then(|| {
            let mut node = Self::build(left, midpoint(left_min, left_max));
            node.children_min_max = left_max;
            Box::new(node)
        });
        let right = (!right.is_empty()).then(|| {
            let mut node = Self::build(right, midpoint(right_min, right_max));
            node.children_min_max = right_min;
            Box::new(node)
        });

        Self {
            center,
            children_min_max: center,
            left,
            right,
            by_start,
            by_end,
        }
    }

    /// Fold every edge crossed by the rightward ray from `(x, y)` into `inside`.
    pub(crate) fn traverse(
        &self,
        vertices: &[f64],
        x: f64,
        y: f64,
        mut inside: bool,
        mut mask: Option<&mut PolygonMask>,
    ) -> bool {
        if y == self.center {
            for ival in &self.by_start {
                inside = toggle(vertices, ival, x, y, inside, mask.as_deref_mut());
            }
        } else if y < self.center {
            if let Some(left) = &self.left {
                if left.children_min_max >= y {
                    inside = left.traverse(vertices, x, y, inside, mask.as_deref_mut());
                }
            }
            for ival in &self.by_start {
                if ival.start > y {
                    break;
                }
                inside = toggle(vertices, ival, x, y, inside, mask.as_deref_mut());
            }
        } else if y > self.center {
            if let Some(right) = &self.right {
                if right.children_min_max <= y {
                    inside = right.traverse(vertices, x, y, inside, mask.as_deref_mut());
                }
            }
            for ival in &self.by_end {
                if ival.end < y {
                    break;
                }
                inside = toggle(vertices, ival, x, y, inside, mask.as_deref_mut());
            }
        }
        inside
    }

    /// Number of levels in the subtree.
    pub(crate) fn depth(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.depth());
        let right = self.right.as_ref().map_or(0, |n| n.depth());
        1 + left.max(right)
    }

    #[cfg(test)]
    fn intervals(&self) -> usize {
        self.by_start.len()
            + self.left.as_ref().map_or(0, |n| n.intervals())
            + self.right.as_ref().map_or(0, |n| n.intervals())
    }
}

#[inline]
fn toggle(
    vertices: &[f64],
    ival: &EdgeInterval,
    x: f64,
    y: f64,
    inside: bool,
    mask: Option<&mut PolygonMask>,
) -> bool {
    if ival.crosses(vertices, x, y) {
        if let Some(mask) = mask {
            mask.flip(ival.polygon);
        }
        !inside
    } else {
        inside
    }
}

// Halves first so extreme coordinates cannot overflow to infinity.
fn midpoint(a: f64, b: f64) -> f64 {
    a * 0.5 + b * 0.5
}
