//! Typed UI<->engine messages for the fotobox.
//!
//! This crate defines all the message types used for communication between
//! the kiosk UI and the booth engine.

mod commands;
mod events;
mod state;
mod types;

pub use commands::BoothCommand;
pub use events::BoothEvent;
pub use state::BoothState;
pub use types::{BoothConfig, CameraDevice, PhotoInfo, RotationPolicy};

use crossbeam_channel::{Receiver, Sender};

/// Channel capacity for commands (UI → Engine).
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Channel capacity for events (Engine → UI).
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Creates a bounded command channel.
pub fn command_channel() -> (Sender<BoothCommand>, Receiver<BoothCommand>) {
    crossbeam_channel::bounded(COMMAND_CHANNEL_CAPACITY)
}

/// Creates a bounded event channel.
pub fn event_channel() -> (Sender<BoothEvent>, Receiver<BoothEvent>) {
    crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY)
}
