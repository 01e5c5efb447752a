//! Parallel rendering into an owned frame buffer.
//!
//! Rows of the frame buffer are rendered in parallel with rayon, and the
//! pixels of each row are again split across the pool. Every task owns a
//! single cell, so the scene is only ever read.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use glint_core::FrameBuffer;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::renderer::{encode_color, render_pixel};
use crate::{Camera, Hittable, RenderConfig};

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub pixels: usize,
    /// Scanlines finished; equals the image height after a full render
    pub rows: usize,
    pub samples: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn samples_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.samples as f64 / secs
        } else {
            0.0
        }
    }
}

/// A render target: the configuration plus the frame buffer it sizes.
///
/// The buffer is allocated up front and filled by [`RenderSession::render`];
/// it is complete once that call returns.
pub struct RenderSession {
    config: RenderConfig,
    frame: FrameBuffer,
}

impl RenderSession {
    pub fn new(config: RenderConfig) -> Self {
        let frame = FrameBuffer::new(config.image_width, config.image_height);
        Self { config, frame }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Hand the finished buffer to the output stage.
    pub fn into_frame(self) -> FrameBuffer {
        self.frame
    }

    /// Render every pixel of the frame.
    pub fn render(&mut self, camera: &Camera, world: &dyn Hittable) -> RenderStats {
        let config = &self.config;
        let width = config.image_width as usize;
        let height = config.image_height as usize;
        let start = Instant::now();

        log::info!(
            "Rendering {}x{} @ {} spp, max depth {}",
            width,
            height,
            config.samples_per_pixel,
            config.max_depth
        );

        let rows_done = AtomicUsize::new(0);

        if width > 0 && height > 0 {
            let progress = ProgressBar::new(height as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40} {pos}/{len} scanlines ETA: {eta}")
            {
                progress.set_style(style);
            }

            self.frame
                .pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, pixels)| {
                    // Row 0 is the top of the image; the camera's t grows upward
                    let y = (height - 1 - row) as u32;

                    pixels.par_iter_mut().enumerate().for_each(|(x, pixel)| {
                        let mut rng = pixel_rng(config.seed, row * width + x);
                        let sum = render_pixel(camera, world, x as u32, y, config, &mut rng);
                        *pixel = encode_color(sum, config.samples_per_pixel);
                    });

                    let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                    progress.inc(1);
                    log::trace!("Scanlines remaining: {}", height - done);
                });

            progress.finish_and_clear();
        }

        let stats = RenderStats {
            pixels: width * height,
            rows: rows_done.into_inner(),
            samples: (width * height) as u64 * config.samples_per_pixel as u64,
            elapsed: start.elapsed(),
        };

        log::info!(
            "Rendered in {:.2?} ({:.0} samples/s)",
            stats.elapsed,
            stats.samples_per_second()
        );

        stats
    }
}

/// Render a full frame in one call.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> FrameBuffer {
    let mut session = RenderSession::new(config.clone());
    session.render(camera, world);
    session.into_frame()
}

/// Independent generator for one pixel.
///
/// Derived from the base seed and the pixel index so results don't depend
/// on which thread picks the pixel up.
fn pixel_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CameraSettings, Color, DiffuseLight, HittableList, Lambertian, Material, Sphere,
    };
    use glint_math::DVec3;
    use std::sync::Arc;

    fn camera(aspect: f64) -> Camera {
        CameraSettings::new()
            .with_position(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0), DVec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect_ratio(aspect)
            .build()
    }

    fn sphere(center: DVec3, radius: f64, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(center, radius, material))
    }

    #[test]
    fn test_empty_scene_is_background_everywhere() {
        let background = Color::new(0.7, 0.8, 1.0);
        let expected = encode_color(background, 1);

        for spp in [1, 3, 8] {
            let config = RenderConfig::default()
                .with_resolution(12, 9)
                .with_quality(spp, 10)
                .with_background(background);

            let frame = render(&camera(12.0 / 9.0), &HittableList::new(), &config);
            assert_eq!(frame.len(), 12 * 9);
            assert!(frame.pixels().iter().all(|p| *p == expected), "spp = {spp}");
        }
    }

    /// One diffuse sphere filling the middle of a 16x16 frame.
    fn lambertian_session(max_depth: u32) -> (FrameBuffer, [u8; 3], [u8; 3]) {
        let albedo = Color::new(0.5, 0.25, 0.75);
        let background = Color::new(0.9, 0.6, 0.3);

        let mut world = HittableList::new();
        world.add(sphere(
            DVec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(Lambertian::new(albedo)),
        ));

        let config = RenderConfig::default()
            .with_resolution(16, 16)
            .with_quality(1, max_depth)
            .with_background(background)
            .with_seed(7);

        let mut session = RenderSession::new(config);
        let stats = session.render(&camera(1.0), &world);
        assert_eq!(stats.pixels, 256);
        assert_eq!(stats.rows, 16);
        assert_eq!(stats.samples, 256);

        (
            session.into_frame(),
            encode_color(background, 1),
            encode_color(albedo * background, 1),
        )
    }

    #[test]
    fn test_lambertian_sphere_depth_two() {
        let (frame, miss, hit) = lambertian_session(2);

        // Corners miss, the center hits
        assert_eq!(frame.get(0, 0), miss);
        assert_eq!(frame.get(15, 15), miss);
        assert_eq!(frame.get(8, 8), hit);
        assert_eq!(frame.get(7, 7), hit);
        assert!(frame.pixels().iter().all(|p| *p == miss || *p == hit));
    }

    #[test]
    fn test_lambertian_sphere_depth_one_cuts_the_bounce() {
        let (frame, miss, _) = lambertian_session(1);

        assert_eq!(frame.get(0, 0), miss);
        assert_eq!(frame.get(8, 8), [0, 0, 0]);
        assert!(frame.pixels().iter().all(|p| *p == miss || *p == [0, 0, 0]));
    }

    #[test]
    fn test_overlapping_spheres_show_the_nearer_one() {
        let near = Color::new(0.9, 0.1, 0.1);
        let far = Color::new(0.1, 0.1, 0.9);

        // Far sphere inserted first; the two volumes overlap along the view axis
        let mut world = HittableList::new();
        world.add(sphere(DVec3::new(0.0, 0.0, -4.0), 1.5, Arc::new(DiffuseLight::new(far))));
        world.add(sphere(DVec3::new(0.0, 0.0, -2.5), 1.0, Arc::new(DiffuseLight::new(near))));

        let config = RenderConfig::default()
            .with_resolution(9, 9)
            .with_quality(4, 5);
        let frame = render(&camera(1.0), &world, &config);

        assert_eq!(frame.get(4, 4), encode_color(near, 1));
        assert_eq!(frame.get(0, 0), encode_color(Color::ZERO, 1));
    }

    #[test]
    fn test_top_row_is_up() {
        // A light above the camera should land in the top rows only
        let mut world = HittableList::new();
        world.add(sphere(
            DVec3::new(0.0, 1.5, -2.0),
            0.9,
            Arc::new(DiffuseLight::new(Color::ONE)),
        ));

        let config = RenderConfig::default()
            .with_resolution(10, 10)
            .with_quality(1, 2);
        let frame = render(&camera(1.0), &world, &config);

        assert_ne!(frame.get(5, 1), [0, 0, 0]);
        assert_eq!(frame.get(5, 9), [0, 0, 0]);
    }

    #[test]
    fn test_same_seed_same_image() {
        let mut world = HittableList::new();
        world.add(sphere(
            DVec3::new(0.0, 0.0, -2.0),
            1.0,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        ));
        world.add(sphere(
            DVec3::new(0.0, -101.0, -2.0),
            100.0,
            Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
        ));

        let config = RenderConfig::default()
            .with_resolution(16, 12)
            .with_quality(4, 8)
            .with_background(Color::new(0.7, 0.8, 1.0))
            .with_seed(1234);

        let a = render(&camera(16.0 / 12.0), &world, &config);
        let b = render(&camera(16.0 / 12.0), &world, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_counts_every_scanline() {
        let config = RenderConfig::default()
            .with_resolution(7, 13)
            .with_quality(1, 1);
        let mut session = RenderSession::new(config);
        let stats = session.render(&camera(7.0 / 13.0), &HittableList::new());

        assert_eq!(stats.rows, 13);
        assert_eq!(stats.pixels, 7 * 13);
    }

    #[test]
    fn test_zero_sized_frame() {
        let config = RenderConfig::default().with_resolution(0, 10);
        let mut session = RenderSession::new(config);
        let stats = session.render(&camera(1.0), &HittableList::new());

        assert_eq!(stats.pixels, 0);
        assert_eq!(stats.rows, 0);
        assert!(session.frame().is_empty());
    }
}
