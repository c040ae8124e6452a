//! Commands sent from the UI to the engine.

use serde::{Deserialize, Serialize};

/// Commands that the UI can send to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoothCommand {
    /// Start a capture cycle: acquire the camera and begin the countdown.
    StartCapture,

    /// Print the current photo on the next printer in rotation.
    Print,

    /// Request the list of available camera devices.
    GetCameraDevices,

    /// Request current booth state.
    GetState,

    /// Shutdown the engine completely.
    Shutdown,
}
