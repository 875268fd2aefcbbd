//! Point-in-polygon queries over a set of polygons.

use spatia_math::{Aabb2, Point2};

use crate::error::{LocatorError, Result};
use crate::interval_tree::{EdgeInterval, IntervalNode};
use crate::PolygonMask;

/// Preprocessed polygon set answering even-odd point containment queries.
///
/// The vertex buffer is borrowed, not copied. After construction the locator
/// is immutable and can be shared across threads; each concurrent caller of
/// [`test_point_in`](Self::test_point_in) supplies its own mask.
///
/// ```
/// use spatia_polygon::PolygonSetLocator;
///
/// // Outer square with a square hole.
/// let vertices = [
///     0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0,
///     3.0, 3.0, 7.0, 3.0, 7.0, 7.0, 3.0, 7.0,
/// ];
/// let locator = PolygonSetLocator::new(&vertices, Some(&[4]), 8).unwrap();
/// assert!(locator.test_point(1.0, 1.0));
/// assert!(!locator.test_point(5.0, 5.0));
/// ```
#[derive(Debug, Clone)]
pub struct PolygonSetLocator<'a> {
    vertices: &'a [f64],
    bounds: Aabb2,
    center: Point2,
    radius_squared: f64,
    polygon_count: usize,
    edge_count: usize,
    tree: IntervalNode,
}

impl<'a> PolygonSetLocator<'a> {
    /// Build a locator over the first `count` vertices of `vertices`, a flat
    /// buffer of interleaved `x, y` pairs.
    ///
    /// `polygon_starts` holds the index of the first vertex of every polygon
    /// after the first; `None` treats all vertices as one polygon. Each
    /// polygon is closed implicitly from its last vertex back to its first.
    pub fn new(
        vertices: &'a [f64],
        polygon_starts: Option<&[usize]>,
        count: usize,
    ) -> Result<Self> {
        let available = vertices.len() / 2;
        if count > available {
            return Err(LocatorError::OutOfRange { count, available });
        }
        let starts = polygon_starts.unwrap_or(&[]);
        validate_starts(starts, count)?;

        let mut bounds = Aabb2::empty();
        for i in 0..count {
            bounds.include(vertices[2 * i], vertices[2 * i + 1]);
        }
        let center = bounds.center();
        let radius_squared = (bounds.max - center).norm_squared();

        let mut intervals = Vec::with_capacity(count);
        let polygon_count = if count == 0 { 0 } else { starts.len() + 1 };
        for polygon in 0..polygon_count {
            let first = if polygon == 0 { 0 } else { starts[polygon - 1] };
            let last = starts.get(polygon).copied().unwrap_or(count) - 1;
            for i in first..last {
                intervals.push(EdgeInterval::new(vertices, i, i + 1, polygon));
            }
            intervals.push(EdgeInterval::new(vertices, last, first, polygon));
        }

        let edge_count = intervals.len();
        let tree = IntervalNode::build(intervals, center.y);
        tracing::debug!(
            polygons = polygon_count,
            edges = edge_count,
            depth = tree.depth(),
            "polygon locator built"
        );

        Ok(Self {
            vertices,
            bounds,
            center,
            radius_squared,
            polygon_count,
            edge_count,
            tree,
        })
    }

    /// Whether `(x, y)` is inside the polygon set under the even-odd rule.
    pub fn test_point(&self, x: f64, y: f64) -> bool {
        if self.rejects(x, y) {
            return false;
        }
        self.tree.traverse(self.vertices, x, y, false, None)
    }

    /// Like [`test_point`](Self::test_point), also recording in `mask` which
    /// individual polygons contain the point.
    ///
    /// The mask is cleared first. Where polygons overlap or nest, several
    /// bits can be set while the even-odd result is `false`.
    pub fn test_point_in(&self, x: f64, y: f64, mask: &mut PolygonMask) -> bool {
        mask.clear();
        if self.rejects(x, y) {
            return false;
        }
        self.tree.traverse(self.vertices, x, y, false, Some(mask))
    }

    // Bounding circle first (no sqrt), then the box.
    fn rejects(&self, x: f64, y: f64) -> bool {
        if self.edge_count == 0 {
            return true;
        }
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        dx * dx + dy * dy > self.radius_squared || self.bounds.excludes(x, y)
    }

    /// Bounding box of all vertices.
    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    /// Number of polygons.
    pub fn polygon_count(&self) -> usize {
        self.polygon_count
    }

    /// Number of edges indexed.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Depth of the edge interval tree.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }
}

fn validate_starts(starts: &[usize], count: usize) -> Result<()> {
    let mut previous = 0;
    for (i, &start) in starts.iter().enumerate() {
        let polygon = i + 1;
        if start >= count {
            return Err(LocatorError::InvalidPolygonStart {
                polygon,
                start,
                reason: "past the last vertex",
            });
        }
        if start <= previous {
            return Err(LocatorError::InvalidPolygonStart {
                polygon,
                start,
                reason: "not after the previous polygon's start",
            });
        }
        previous = start;
    }
    Ok(())
}
