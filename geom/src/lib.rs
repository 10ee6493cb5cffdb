//! The geometry that binpack needs and nothing more: axis-aligned bounding
//! boxes in two and three dimensions, plus a rigid transform type for moving
//! a payload from its local origin to its packed location.
//!
//! Everything here is a thin layer over [nalgebra](https://nalgebra.org), whose
//! point and vector types are re-exported so that callers don't need to depend
//! on it directly.
//!
//! ## Example
//! ```
//! use binpack_geom::{BoundingBox, Point3};
//!
//! let a = BoundingBox::from_corners(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0));
//! let b = BoundingBox::from_corners(Point3::new(4.0, 0.0, 0.0), Point3::new(8.0, 4.0, 4.0));
//!
//! // Touching faces don't count as an intersection.
//! assert!(!a.intersects(&b));
//! ```

mod aabb;
mod transform;

pub use aabb::*;
pub use transform::*;

pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};
