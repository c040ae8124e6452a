//! Border composition and JPEG persistence for the fotobox.
//!
//! The composition step is a pure function over the source frame: it never
//! mutates its input and produces the same output for the same input.

mod error;

pub use error::ComposeError;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use tracing::debug;

/// Result type for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Distance of the decorative border from each frame edge, in pixels.
pub const BORDER_INSET: u32 = 10;

/// Stroke thickness of the decorative border, in pixels.
pub const BORDER_THICKNESS: u32 = 3;

/// Accent color of the decorative border.
pub const BORDER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Build an [`RgbImage`] from a raw RGB24 buffer.
pub fn image_from_raw(width: u32, height: u32, data: &[u8]) -> ComposeResult<RgbImage> {
    RgbImage::from_raw(width, height, data.to_vec())
        .ok_or(ComposeError::InvalidFrameBuffer { width, height })
}

/// Composite the decorative border onto a copy of the source frame.
///
/// Allocates a new canvas of identical dimensions, draws the source at
/// (0,0) and strokes a rectangle inset [`BORDER_INSET`] pixels from each
/// edge, spanning `width-20 × height-20`. Frames too small to hold the
/// border band are returned as a plain copy.
pub fn add_frame(original: &RgbImage) -> RgbImage {
    let (width, height) = original.dimensions();
    let mut canvas = original.clone();

    let span = BORDER_INSET + BORDER_THICKNESS;
    if width <= 2 * span || height <= 2 * span {
        debug!(width, height, "frame too small for border, returning plain copy");
        return canvas;
    }

    // Horizontal bands.
    for x in BORDER_INSET..width - BORDER_INSET {
        for t in 0..BORDER_THICKNESS {
            canvas.put_pixel(x, BORDER_INSET + t, BORDER_COLOR);
            canvas.put_pixel(x, height - BORDER_INSET - 1 - t, BORDER_COLOR);
        }
    }

    // Vertical bands.
    for y in BORDER_INSET..height - BORDER_INSET {
        for t in 0..BORDER_THICKNESS {
            canvas.put_pixel(BORDER_INSET + t, y, BORDER_COLOR);
            canvas.put_pixel(width - BORDER_INSET - 1 - t, y, BORDER_COLOR);
        }
    }

    canvas
}

/// Encode an image as JPEG into a byte buffer.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> ComposeResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    image.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Write an image as JPEG to the given path, overwriting any existing file.
pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> ComposeResult<()> {
    let file = File::create(path)?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
    image.write_with_encoder(encoder)?;
    debug!(path = %path.display(), "photo written");
    Ok(())
}

/// Load a previously saved photo.
pub fn load_jpeg(path: &Path) -> ComposeResult<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}
