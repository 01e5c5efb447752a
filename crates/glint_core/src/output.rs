//! Frame buffer serialization.
//!
//! The native format is plain-text PPM (`P3`): a three-token header
//! (format tag, dimensions, max channel value) followed by one
//! whitespace-separated `r g b` line per pixel, top row first.
//! Other extensions are handed to the `image` crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

use crate::FrameBuffer;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("frame buffer does not match its {width}x{height} dimensions")]
    BadDimensions { width: u32, height: u32 },

    #[error("no writable image format for {path}")]
    UnsupportedFormat { path: PathBuf },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Output format picked from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text `P3` PPM.
    Ppm,
    /// An `image` format this build can encode.
    Encoded(ImageFormat),
}

impl OutputFormat {
    /// Resolve the format for `path`.
    ///
    /// Fails for a missing extension or one no enabled encoder handles, so
    /// callers can reject the target before doing any work.
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        let unsupported = || OutputError::UnsupportedFormat {
            path: path.to_path_buf(),
        };

        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(unsupported)?;
        if ext.eq_ignore_ascii_case("ppm") {
            return Ok(OutputFormat::Ppm);
        }

        match ImageFormat::from_extension(ext) {
            Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => {
                Ok(OutputFormat::Encoded(format))
            }
            _ => Err(unsupported()),
        }
    }
}

/// Write `frame` as plain-text PPM.
pub fn write_ppm<W: Write>(frame: &FrameBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width(), frame.height())?;
    writeln!(writer, "255")?;

    for [r, g, b] in frame.pixels() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Save `frame` to `path`, choosing the format from the extension.
pub fn save(frame: &FrameBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();

    match OutputFormat::from_path(path)? {
        OutputFormat::Ppm => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(frame, &mut writer)?;
        }
        OutputFormat::Encoded(format) => {
            let (width, height) = (frame.width(), frame.height());
            let img = image::RgbImage::from_raw(width, height, frame.to_rgb_bytes())
                .ok_or(OutputError::BadDimensions { width, height })?;
            img.save_with_format(path, format)?;
        }
    }

    log::info!("Saved {}x{} image to {}", frame.width(), frame.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ppm_layout() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.set(0, 0, [255, 0, 0]);
        frame.set(1, 0, [0, 255, 0]);
        frame.set(0, 1, [0, 0, 255]);
        frame.set(1, 1, [7, 8, 9]);

        let mut out = Vec::new();
        write_ppm(&frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n7 8 9\n"
        );
    }

    #[test]
    fn test_header_tokens() {
        let frame = FrameBuffer::new(3, 1);
        let mut out = Vec::new();
        write_ppm(&frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let tokens: Vec<&str> = text.split_whitespace().take(4).collect();
        assert_eq!(tokens, ["P3", "3", "1", "255"]);
        assert_eq!(text.split_whitespace().count(), 4 + 3 * 3);
    }

    #[test]
    fn test_format_from_path() {
        let format = |p: &str| OutputFormat::from_path(Path::new(p)).ok();

        assert_eq!(format("a/b.ppm"), Some(OutputFormat::Ppm));
        assert_eq!(format("a/b.PPM"), Some(OutputFormat::Ppm));
        assert_eq!(format("out.png"), Some(OutputFormat::Encoded(ImageFormat::Png)));
        assert_eq!(format("out.jpg"), Some(OutputFormat::Encoded(ImageFormat::Jpeg)));
    }

    #[test]
    fn test_unwritable_formats_are_rejected() {
        for p in ["out.txt", "out", "dir/", "scene.gif"] {
            let err = OutputFormat::from_path(Path::new(p)).unwrap_err();
            assert!(matches!(err, OutputError::UnsupportedFormat { .. }), "{p}");
        }
    }

    #[test]
    fn test_save_rejects_unknown_extension_without_creating_file() {
        let path = std::env::temp_dir().join(format!("glint_reject_{}.txt", std::process::id()));
        let err = save(&FrameBuffer::new(2, 2), &path).unwrap_err();

        assert!(matches!(err, OutputError::UnsupportedFormat { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_png_and_ppm() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = std::env::temp_dir().join(format!("glint_output_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut frame = FrameBuffer::new(2, 1);
        frame.set(1, 0, [12, 34, 56]);

        let png = dir.join("frame.png");
        save(&frame, &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(1, 0).0, [12, 34, 56]);

        let ppm = dir.join("frame.ppm");
        save(&frame, &ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.ends_with("12 34 56\n"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
