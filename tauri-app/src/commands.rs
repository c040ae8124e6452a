//! Tauri command handlers.

use tauri::State;
use tracing::{debug, instrument};

use fotobox_ipc::BoothCommand;

use crate::AppState;

/// Start a capture cycle.
#[tauri::command]
#[instrument(skip(state))]
pub async fn start_capture(state: State<'_, AppState>) -> Result<(), String> {
    debug!("start_capture command");
    state
        .command_tx
        .send(BoothCommand::StartCapture)
        .map_err(|e| format!("Failed to send command: {}", e))
}

/// Print the current photo.
#[tauri::command]
#[instrument(skip(state))]
pub async fn print_photo(state: State<'_, AppState>) -> Result<(), String> {
    debug!("print_photo command");
    state
        .command_tx
        .send(BoothCommand::Print)
        .map_err(|e| format!("Failed to send command: {}", e))
}

/// Request the list of camera devices from the engine.
#[tauri::command]
pub async fn get_camera_devices(state: State<'_, AppState>) -> Result<(), String> {
    state
        .command_tx
        .send(BoothCommand::GetCameraDevices)
        .map_err(|e| format!("Failed to send command: {}", e))
}

/// Request current booth state.
#[tauri::command]
pub async fn get_state(state: State<'_, AppState>) -> Result<(), String> {
    state
        .command_tx
        .send(BoothCommand::GetState)
        .map_err(|e| format!("Failed to send command: {}", e))
}
