//! Error types for the compose module.

use thiserror::Error;

/// Errors that can occur during composition and persistence.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Raw buffer does not match the stated dimensions.
    #[error("frame buffer does not match {width}x{height} RGB dimensions")]
    InvalidFrameBuffer { width: u32, height: u32 },

    /// Image encode/decode error.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// Photo I/O error.
    #[error("photo I/O error: {0}")]
    Io(#[from] std::io::Error),
}
