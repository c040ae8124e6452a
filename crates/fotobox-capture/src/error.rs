//! Error types for the capture module.

use thiserror::Error;

/// Errors that can occur during capture operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No camera device was found during enumeration.
    #[error("no camera device found")]
    NoDeviceFound,

    /// Camera backend error.
    #[error("camera backend error: {0}")]
    Backend(#[from] nokhwa::NokhwaError),

    /// Capture already started.
    #[error("capture already started")]
    AlreadyStarted,
}
