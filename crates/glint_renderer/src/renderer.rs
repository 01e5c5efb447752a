//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma-2 encoding and 8-bit quantization

use glint_core::Rgb8;
use glint_math::random::random_f64;
use glint_math::{Color, Interval};
use rand::RngCore;

use crate::{Camera, Hittable, Ray};

/// Closest a scattered ray may re-hit its own origin surface.
const T_MIN: f64 = 0.001;

/// Channel range before quantization; keeps `256 * c` below 256.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Base seed; every pixel derives its own generator from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 600,
            image_height: 600,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set width and derive the height from an aspect ratio.
    pub fn with_width_and_aspect(self, width: u32, aspect_ratio: f64) -> Self {
        let height = ((width as f64 / aspect_ratio) as u32).max(1);
        self.with_resolution(width, height)
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }
}

/// Compute the color seen by a ray.
///
/// Each bounce multiplies in its attenuation, so the recursion is bounded
/// by `depth` and a path that runs out of depth contributes black.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return background;
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emitted
                + scatter.attenuation
                    * ray_color(&scatter.scattered, background, world, depth - 1, rng)
        }
        // Absorbed, or a light source
        None => emitted,
    }
}

/// Sum `samples_per_pixel` jittered estimates for pixel `(x, y)`.
///
/// `y` counts from the bottom of the image, matching the camera's `t`.
/// The sum is not normalized; [`encode_color`] divides by the sample count.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let s_den = config.image_width.saturating_sub(1).max(1) as f64;
    let t_den = config.image_height.saturating_sub(1).max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + random_f64(rng)) / s_den;
        let t = (y as f64 + random_f64(rng)) / t_den;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, config.background, world, config.max_depth, rng);
    }

    pixel_color
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Turn an accumulated sample sum into an output pixel.
///
/// Averages, gamma-encodes, zeroes non-finite channels, clamps to
/// `[0, 0.999]` and quantizes to `0..=255`.
pub fn encode_color(pixel_color: Color, samples_per_pixel: u32) -> Rgb8 {
    let scale = 1.0 / samples_per_pixel as f64;

    let quantize = |c: f64| {
        let gamma = linear_to_gamma(scale * c);
        let gamma = if gamma.is_finite() { gamma } else { 0.0 };
        (256.0 * INTENSITY.clamp(gamma)) as u8
    };

    [
        quantize(pixel_color.x),
        quantize(pixel_color.y),
        quantize(pixel_color.z),
    ]
}
