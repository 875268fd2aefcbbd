//! Randomized agreement between the interval tree and a full edge scan.

use proptest::prelude::*;
use spatia_polygon::{PolygonMask, PolygonSetLocator};

/// Scan every edge of every polygon with the same crossing rule.
fn scan(polygons: &[Vec<(f64, f64)>], x: f64, y: f64) -> (bool, Vec<usize>) {
    let mut inside = false;
    let mut hits = Vec::new();
    for (p, polygon) in polygons.iter().enumerate() {
        let mut own = false;
        for (i, &(xi, yi)) in polygon.iter().enumerate() {
            let (xj, yj) = polygon[(i + 1) % polygon.len()];
            if ((yi < y && yj >= y) || (yj < y && yi >= y)) && (xi >= x || xj >= x) {
                let crossing = xi + (y - yi) / (yj - yi) * (xj - xi);
                if crossing >= x {
                    own = !own;
                }
            }
        }
        if own {
            hits.push(p);
        }
        inside ^= own;
    }
    (inside, hits)
}

fn flatten(polygons: &[Vec<(f64, f64)>]) -> (Vec<f64>, Vec<usize>) {
    let mut vertices = Vec::new();
    let mut starts = Vec::new();
    for (p, polygon) in polygons.iter().enumerate() {
        if p > 0 {
            starts.push(vertices.len() / 2);
        }
        for &(x, y) in polygon {
            vertices.push(x);
            vertices.push(y);
        }
    }
    (vertices, starts)
}

// Half-unit grid so vertices often sit exactly at query heights.
fn polygon_set() -> impl Strategy<Value = Vec<Vec<(f64, f64)>>> {
    prop::collection::vec(
        prop::collection::vec(
            (-8i32..=8, -8i32..=8).prop_map(|(x, y)| (x as f64 * 0.5, y as f64 * 0.5)),
            3..12,
        ),
        1..5,
    )
}

proptest! {
    #[test]
    fn tree_agrees_with_scan(
        polygons in polygon_set(),
        queries in prop::collection::vec((-20i32..=20, -20i32..=20), 1..32),
    ) {
        let (vertices, starts) = flatten(&polygons);
        let locator = PolygonSetLocator::new(&vertices, Some(&starts), vertices.len() / 2).unwrap();
        prop_assert_eq!(locator.polygon_count(), polygons.len());

        let mut mask = PolygonMask::new();
        for (qx, qy) in queries {
            let (x, y) = (qx as f64 * 0.25, qy as f64 * 0.25);
            let (expected, hits) = scan(&polygons, x, y);
            prop_assert_eq!(locator.test_point(x, y), expected, "point ({}, {})", x, y);
            prop_assert_eq!(locator.test_point_in(x, y, &mut mask), expected);
            prop_assert_eq!(mask.iter().collect::<Vec<_>>(), hits);
        }
    }

    #[test]
    fn points_outside_bounds_are_outside(
        polygons in polygon_set(),
        offset in 0.01f64..100.0,
        t in 0.0f64..1.0,
        side in 0usize..4,
    ) {
        let (vertices, starts) = flatten(&polygons);
        let locator = PolygonSetLocator::new(&vertices, Some(&starts), vertices.len() / 2).unwrap();
        let bounds = locator.bounds();
        let along_x = bounds.min.x + t * (bounds.max.x - bounds.min.x);
        let along_y = bounds.min.y + t * (bounds.max.y - bounds.min.y);
        let (x, y) = match side {
            0 => (bounds.min.x - offset, along_y),
            1 => (bounds.max.x + offset, along_y),
            2 => (along_x, bounds.min.y - offset),
            _ => (along_x, bounds.max.y + offset),
        };
        let mut mask = PolygonMask::new();
        prop_assert!(!locator.test_point_in(x, y, &mut mask));
        prop_assert!(mask.is_empty());
    }
}
