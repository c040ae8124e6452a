//! Booth state machine types.

use serde::{Deserialize, Serialize};

use crate::types::PhotoInfo;

/// The current state of the capture workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum BoothState {
    /// Waiting for a capture request.
    #[default]
    Idle,

    /// Countdown is running.
    CountingDown {
        /// Seconds remaining on the display.
        remaining: u32,
    },

    /// Countdown expired; the latest frame is being composited.
    Capturing,

    /// A composited photo is available for preview and printing.
    Ready {
        /// The current photo.
        photo: PhotoInfo,
    },
}

impl BoothState {
    /// Returns true if the booth is idle.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if the countdown is running.
    pub fn is_counting_down(&self) -> bool {
        matches!(self, Self::CountingDown { .. })
    }

    /// Returns true if a capture is in progress.
    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Capturing)
    }

    /// Returns true if a photo is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Returns a simple string representation of the state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CountingDown { .. } => "CountingDown",
            Self::Capturing => "Capturing",
            Self::Ready { .. } => "Ready",
        }
    }
}
