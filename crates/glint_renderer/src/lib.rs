//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer: primary rays from a thin-lens camera are
//! bounced through an unaccelerated list of primitives until they hit an
//! emitter, escape to the background or run out of depth.

mod aarect;
mod camera;
mod hittable;
mod material;
mod moving_sphere;
mod perlin;
mod renderer;
mod session;
mod sphere;
mod texture;

pub use aarect::{AaRect, RectPlane};
pub use camera::{Camera, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, Scatter};
pub use moving_sphere::MovingSphere;
pub use perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};
pub use renderer::{encode_color, linear_to_gamma, ray_color, render_pixel, RenderConfig};
pub use session::{render, RenderSession, RenderStats};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};

/// Re-export the math types the public API is written in
pub use glint_math::{Color, DVec3, Interval, Point3, Ray};
