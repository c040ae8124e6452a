//! Webcam capture for the fotobox.
//!
//! This crate provides camera enumeration and a streaming capture session
//! that delivers frames over a bounded channel.

mod device;
mod error;
mod frame;
mod session;

pub use device::enumerate_cameras;
pub use error::CaptureError;
pub use frame::CapturedFrame;
pub use session::CameraSession;

use crossbeam_channel::Receiver;

/// Channel capacity for captured frames.
pub const FRAME_CHANNEL_CAPACITY: usize = 3;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Trait for frame sources.
pub trait FrameSource: Send {
    /// Start delivering frames.
    fn start(&mut self) -> CaptureResult<Receiver<CapturedFrame>>;

    /// Stop delivering frames.
    fn stop(&mut self) -> CaptureResult<()>;

    /// Check if the source is active.
    fn is_active(&self) -> bool;
}
