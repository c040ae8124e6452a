//! Camera device enumeration.

use nokhwa::query;
use nokhwa::utils::ApiBackend;
use tracing::{debug, instrument};

use fotobox_ipc::CameraDevice;

use crate::error::CaptureError;
use crate::CaptureResult;

/// Enumerate the available camera devices.
///
/// Fails with [`CaptureError::NoDeviceFound`] when enumeration yields zero
/// devices.
#[instrument(name = "enumerate_cameras")]
pub fn enumerate_cameras() -> CaptureResult<Vec<CameraDevice>> {
    let cameras = query(ApiBackend::Auto)?;

    if cameras.is_empty() {
        return Err(CaptureError::NoDeviceFound);
    }

    let devices: Vec<CameraDevice> = cameras
        .iter()
        .map(|info| CameraDevice {
            id: info.index().to_string(),
            name: info.human_name(),
        })
        .collect();

    debug!(count = devices.len(), "cameras enumerated");
    Ok(devices)
}
