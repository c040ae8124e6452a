//! Captured frame types.

use bytes::Bytes;
use std::time::Instant;

/// A captured camera frame.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// RGB24 pixel data.
    pub data: Bytes,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Monotonic timestamp taken when the frame was delivered.
    pub captured_at: Instant,

    /// Monotonically increasing sequence number.
    pub sequence: u64,
}

impl CapturedFrame {
    /// Create a new captured frame.
    pub fn new(data: Bytes, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            data,
            width,
            height,
            captured_at: Instant::now(),
            sequence,
        }
    }

    /// Calculate expected RGB24 buffer size for given dimensions.
    pub fn rgb_buffer_size(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * 3
    }

    /// Validate that the frame data matches expected dimensions.
    pub fn is_valid(&self) -> bool {
        self.data.len() == Self::rgb_buffer_size(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_buffer_size() {
        assert_eq!(CapturedFrame::rgb_buffer_size(640, 480), 640 * 480 * 3);
        assert_eq!(CapturedFrame::rgb_buffer_size(0, 480), 0);
    }

    #[test]
    fn test_frame_validity() {
        let good = CapturedFrame::new(Bytes::from(vec![0u8; 4 * 2 * 3]), 4, 2, 1);
        assert!(good.is_valid());

        let bad = CapturedFrame::new(Bytes::from(vec![0u8; 10]), 4, 2, 2);
        assert!(!bad.is_valid());
    }
}
