//! Glint Math - vector, ray and sampling primitives.
//!
//! Vectors come from `glam` in double precision. A `DVec3` is used
//! interchangeably as a point, a direction or a linear RGB color.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod vec;

pub mod random;

pub use interval::Interval;
pub use ray::Ray;
pub use vec::{degrees_to_radians, near_zero, reflect, refract, unit_vector};

/// Linear RGB color.
pub type Color = DVec3;

/// A point in world space.
pub type Point3 = DVec3;
