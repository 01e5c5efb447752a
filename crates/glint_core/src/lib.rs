//! Glint Core - frame buffers and image I/O.
//!
//! This crate provides the pieces around the renderer that touch pixels
//! but not light transport:
//!
//! - **Frame buffer**: the quantized RGB8 target a render fills
//! - **Image data**: decoded RGB8 images backing image textures
//! - **Output**: PPM text serialization, plus any format `image` encodes

pub mod frame;
pub mod image_data;
pub mod output;

// Re-export commonly used types
pub use frame::{FrameBuffer, Rgb8};
pub use image_data::{ImageData, ImageLoadError};
pub use output::{save, write_ppm, OutputError, OutputFormat};
