//! Common types used across IPC messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the booth engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoothConfig {
    /// Camera device identifier (None for the first enumerated device).
    pub camera_device: Option<String>,

    /// Printer names in rotation order.
    pub printers: Vec<String>,

    /// Countdown start value in seconds.
    pub countdown_start: u32,

    /// Path the composited photo is written to.
    pub photo_path: PathBuf,

    /// How the printer rotation behaves when a submission fails.
    pub rotation_policy: RotationPolicy,

    /// Minimum interval between preview frames sent to the UI, in ms.
    pub preview_interval_ms: u64,

    /// JPEG quality for the persisted photo and preview frames (1-100).
    pub jpeg_quality: u8,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            camera_device: None,
            printers: vec!["Drucker1".to_string(), "Drucker2".to_string()],
            countdown_start: 3,
            photo_path: PathBuf::from("foto.jpg"),
            rotation_policy: RotationPolicy::AdvanceAlways,
            preview_interval_ms: 100,
            jpeg_quality: 85,
        }
    }
}

/// Printer rotation behavior on a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationPolicy {
    /// Advance to the next printer even when submission fails.
    AdvanceAlways,

    /// Retry the same printer until a submission succeeds.
    HoldOnFailure,
}

/// A camera device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDevice {
    /// Unique identifier for this device.
    pub id: String,

    /// Display name for the UI.
    pub name: String,
}

/// Metadata for a captured photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoInfo {
    /// Path the JPEG was written to.
    pub path: PathBuf,

    /// Photo width in pixels.
    pub width: u32,

    /// Photo height in pixels.
    pub height: u32,

    /// Sequence number of the source frame.
    pub sequence: u64,
}
