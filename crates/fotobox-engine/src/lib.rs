//! Capture workflow engine for the fotobox.
//!
//! This crate coordinates camera capture, border composition, and print
//! submission behind a command/event channel pair consumed by the UI.

mod orchestrator;
mod workflow;

pub use orchestrator::Booth;
pub use workflow::{Workflow, WorkflowInput};

use crossbeam_channel::{Receiver, Sender};
use fotobox_ipc::{BoothCommand, BoothConfig, BoothEvent};

/// Create a booth engine instance with IPC channels.
pub fn create_booth(
    command_rx: Receiver<BoothCommand>,
    event_tx: Sender<BoothEvent>,
    config: BoothConfig,
) -> Booth {
    Booth::new(command_rx, event_tx, config)
}
