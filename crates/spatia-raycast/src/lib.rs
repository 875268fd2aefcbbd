#![warn(missing_docs)]

//! Ray queries for the spatia toolkit.
//!
//! # Architecture
//!
//! - [`RaySlopeIntersector`] - Ray classified by direction signs with cached
//!   slopes; answers many ray/box tests in constant time each
//! - [`Ray`] - Plain ray with the slab test, returning entry/exit parameters
//! - [`FrustumRays`] - Picking rays extracted from a projection-view matrix
//!
//! # Example
//!
//! ```
//! use spatia_math::{Aabb3, Point3, Vec3};
//! use spatia_raycast::RaySlopeIntersector;
//!
//! let boxes = [
//!     Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
//!     Aabb3::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)),
//! ];
//! let ray = RaySlopeIntersector::with_ray(Point3::new(-1.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
//! let hit: Vec<bool> = boxes.iter().map(|b| ray.test_aabb(b)).collect();
//! assert_eq!(hit, [true, false]);
//! ```

pub mod error;
pub mod frustum;
mod ray;
pub mod slope;

pub use error::{RaycastError, Result};
pub use frustum::{Corner, FrustumRays};
pub use ray::Ray;
pub use slope::{RaySlopeIntersector, Sign, SlopeClass};
