//! Textures: spatially varying colors looked up at a hit.

use std::path::Path;
use std::sync::Arc;

use glint_core::ImageData;
use glint_math::{Color, Interval, Point3};
use rand::Rng;

use crate::perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};

/// Trait for anything that maps a surface coordinate and point to a color.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A single constant color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.color
    }
}

/// 3D sinusoidal checker: picks `odd` where
/// `sin(10x) * sin(10y) * sin(10z) < 0`, `even` elsewhere.
///
/// Cells follow the sign of the product, so they are not a square grid.
#[derive(Clone)]
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like procedural noise.
///
/// Gray level `0.5 * (1 + sin(scale * z) + 10 * turb(p))`. Not clamped;
/// values above 1 saturate in the output encoding.
#[derive(Clone, Debug)]
pub struct NoiseTexture {
    noise: Perlin,
    scale: f64,
}

impl NoiseTexture {
    pub fn new<R: Rng + ?Sized>(scale: f64, rng: &mut R) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        let turb = self.noise.turb(p, DEFAULT_TURBULENCE_DEPTH);
        Color::ONE * 0.5 * (1.0 + (self.scale * p.z).sin() + 10.0 * turb)
    }
}

/// Nearest-pixel lookup into a decoded RGB8 image.
///
/// Without image data every lookup returns [`ImageTexture::FALLBACK`].
#[derive(Clone, Debug)]
pub struct ImageTexture {
    image: Option<ImageData>,
}

impl ImageTexture {
    /// Color returned when no image is loaded (cyan).
    pub const FALLBACK: Color = Color::new(0.0, 1.0, 1.0);

    pub fn new(image: ImageData) -> Self {
        Self { image: Some(image) }
    }

    /// A texture with no data; renders as the fallback color.
    pub fn missing() -> Self {
        Self { image: None }
    }

    /// Decode `path`; on failure log a warning and fall back.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match ImageData::open(path) {
            Ok(image) => Self::new(image),
            Err(err) => {
                log::warn!("Could not load texture image {}: {}", path.display(), err);
                Self::missing()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        let Some(image) = &self.image else {
            return Self::FALLBACK;
        };

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Flip V to image row order
        let v = 1.0 - unit.clamp(v);

        let (width, height) = (image.width(), image.height());
        let i = ((u * width as f64) as u32).min(width - 1);
        let j = ((v * height as f64) as u32).min(height - 1);

        let [r, g, b] = image.pixel(i, j);
        Color::new(r as f64, g as f64, b as f64) / 255.0
    }
}
