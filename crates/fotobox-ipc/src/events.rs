//! Events sent from the engine to the UI.

use serde::{Deserialize, Serialize};

use crate::state::BoothState;
use crate::types::{CameraDevice, PhotoInfo};

/// Events that the engine can send to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoothEvent {
    /// Booth state has changed.
    StateChanged {
        /// Previous state.
        previous: Box<BoothState>,

        /// Current state.
        current: Box<BoothState>,
    },

    /// Countdown display should show this value.
    CountdownTick {
        /// Seconds remaining.
        remaining: u32,
    },

    /// Countdown reached zero; the display should be hidden.
    CountdownFinished,

    /// A live preview frame, JPEG-encoded.
    PreviewFrame {
        /// Source frame width in pixels.
        width: u32,

        /// Source frame height in pixels.
        height: u32,

        /// JPEG bytes.
        data: Vec<u8>,
    },

    /// A photo was captured and persisted.
    PhotoCaptured {
        /// Photo metadata.
        photo: PhotoInfo,

        /// JPEG bytes of the composited photo.
        data: Vec<u8>,
    },

    /// A print job was submitted.
    PhotoPrinted {
        /// Printer the job went to.
        printer: String,
    },

    /// List of available camera devices.
    CameraDevices(Vec<CameraDevice>),

    /// Error occurred.
    Error {
        /// Whether the error is recoverable.
        recoverable: bool,

        /// Error message.
        message: String,
    },

    /// Engine is ready.
    Ready,

    /// Engine has shut down.
    Shutdown,
}
