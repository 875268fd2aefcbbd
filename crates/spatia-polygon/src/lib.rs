#![warn(missing_docs)]

//! Point-in-polygon queries for the spatia toolkit.
//!
//! A [`PolygonSetLocator`] preprocesses a set of 2D polygons (given as a flat
//! `x, y` vertex buffer) into an interval tree keyed on edge y-extents.
//! Queries then visit only the edges whose extent straddles the query height
//! instead of scanning every edge.
//!
//! Containment follows the even-odd rule across the whole set, so nested
//! polygons act as holes. Boundary points are decided by a half-open
//! convention: with the usual counter-clockwise winding, points on left and
//! bottom edges are outside and points on right and top edges are inside.
//! Shared vertices are never counted twice.
//!
//! [`PolygonSetLocator::test_point_in`] additionally reports, through a
//! [`PolygonMask`], which individual polygons contain the point.

pub mod error;
mod interval_tree;
mod locator;
mod mask;

pub use error::{LocatorError, Result};
pub use locator::PolygonSetLocator;
pub use mask::PolygonMask;
