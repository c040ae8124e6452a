//! Camera capture session management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::CallbackCamera;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::CaptureError;
use crate::frame::CapturedFrame;
use crate::{CaptureResult, FrameSource, FRAME_CHANNEL_CAPACITY};

/// A streaming capture session for one camera device.
///
/// Frames are decoded to RGB24 on the camera's delivery thread and pushed
/// into a bounded channel; when the channel is full the newest frame is
/// dropped, since the consumer only ever keeps the latest frame anyway.
pub struct CameraSession {
    index: CameraIndex,
    camera: Option<CallbackCamera>,
    active: Arc<AtomicBool>,
}

impl CameraSession {
    /// Create a new session for the given device identifier.
    pub fn new(device_id: &str) -> Self {
        Self {
            index: parse_camera_index(device_id),
            camera: None,
            active: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl FrameSource for CameraSession {
    #[instrument(name = "capture_start", skip(self), fields(device = %self.index))]
    fn start(&mut self) -> CaptureResult<Receiver<CapturedFrame>> {
        if self.active.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyStarted);
        }

        info!("Starting camera capture");

        let (sender, receiver): (Sender<CapturedFrame>, Receiver<CapturedFrame>) =
            crossbeam_channel::bounded(FRAME_CHANNEL_CAPACITY);

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let active = Arc::clone(&self.active);
        let mut sequence: u64 = 0;

        let mut camera = CallbackCamera::new(self.index.clone(), requested, move |buffer| {
            if !active.load(Ordering::SeqCst) {
                return;
            }

            match buffer.decode_image::<RgbFormat>() {
                Ok(image) => {
                    sequence += 1;
                    let (width, height) = image.dimensions();
                    let frame =
                        CapturedFrame::new(Bytes::from(image.into_raw()), width, height, sequence);

                    if sequence <= 5 || sequence % 100 == 0 {
                        debug!(sequence, width, height, "frame received");
                    }

                    match sender.try_send(frame) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            trace!(sequence, "frame channel full, dropping frame");
                        }
                        Err(TrySendError::Disconnected(_)) => {}
                    }
                }
                Err(e) => warn!("frame decode failed: {e}"),
            }
        })?;

        camera.open_stream()?;

        self.active.store(true, Ordering::SeqCst);
        self.camera = Some(camera);
        info!("Camera capture started");

        Ok(receiver)
    }

    #[instrument(name = "capture_stop", skip(self))]
    fn stop(&mut self) -> CaptureResult<()> {
        if !self.active.load(Ordering::SeqCst) {
            return Ok(());
        }

        info!("Stopping camera capture");
        self.active.store(false, Ordering::SeqCst);

        if let Some(mut camera) = self.camera.take() {
            camera.stop_stream()?;
        }

        info!("Camera capture stopped");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn parse_camera_index(device_id: &str) -> CameraIndex {
    device_id
        .parse::<u32>()
        .map(CameraIndex::Index)
        .unwrap_or_else(|_| CameraIndex::String(device_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_camera_index() {
        assert_eq!(parse_camera_index("0"), CameraIndex::Index(0));
        assert_eq!(parse_camera_index("3"), CameraIndex::Index(3));
    }

    #[test]
    fn test_parse_named_camera_index() {
        assert_eq!(
            parse_camera_index("/dev/video0"),
            CameraIndex::String("/dev/video0".to_string())
        );
    }
}
