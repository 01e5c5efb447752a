//! Decoded 8-bit RGB images used as texture input.
//!
//! Decoding goes through the `image` crate, so anything it was built with
//! (png, jpeg) can back an image texture.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading image data.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("expected {expected} bytes of RGB data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type ImageLoadResult<T> = Result<T, ImageLoadError>;

/// Tightly packed RGB8 pixels, row-major, first row at the top.
#[derive(Clone, Debug)]
pub struct ImageData {
    width: u32,
    height: u32,
    bytes_per_scanline: usize,
    data: Vec<u8>,
}

impl ImageData {
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Wrap raw RGB8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ImageLoadResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImageLoadError::Empty { width, height });
        }

        let bytes_per_scanline = Self::BYTES_PER_PIXEL * width as usize;
        let expected = bytes_per_scanline * height as usize;
        if data.len() != expected {
            return Err(ImageLoadError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            bytes_per_scanline,
            data,
        })
    }

    /// Decode an image file into RGB8.
    pub fn open(path: impl AsRef<Path>) -> ImageLoadResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ImageLoadError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let data = Self::from_raw(width, height, rgb.into_raw())?;

        log::debug!(
            "Loaded image: {} ({}x{}, {:.1} KB)",
            path.display(),
            width,
            height,
            data.data.len() as f32 / 1024.0
        );

        Ok(data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_scanline(&self) -> usize {
        self.bytes_per_scanline
    }

    /// RGB bytes at column `i`, row `j` (row 0 at the top).
    ///
    /// Panics if the coordinates are out of range.
    pub fn pixel(&self, i: u32, j: u32) -> [u8; 3] {
        let start = j as usize * self.bytes_per_scanline + i as usize * Self::BYTES_PER_PIXEL;
        [self.data[start], self.data[start + 1], self.data[start + 2]]
    }
}
