//! Fotobox Tauri application library.
//!
//! Bridges the kiosk frontend to the booth engine: commands go in over a
//! bounded channel, engine events are re-emitted to both windows through
//! Tauri's event system.

mod commands;

use std::fs;
use std::path::Path;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use tauri::{Emitter, Manager};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fotobox_engine::Booth;
use fotobox_ipc::{command_channel, event_channel, BoothCommand, BoothConfig, BoothEvent};

/// Name of the Tauri event carrying [`BoothEvent`] payloads.
const BOOTH_EVENT: &str = "booth-event";

/// Application state shared with Tauri commands.
pub struct AppState {
    pub command_tx: Sender<BoothCommand>,
}

/// Initialize logging.
fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "fotobox=debug,fotobox_engine=debug,fotobox_capture=debug,fotobox_compose=debug,fotobox_print=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load the booth configuration from `fotobox.json` next to the working
/// directory, falling back to defaults.
fn load_config() -> BoothConfig {
    let path = Path::new("fotobox.json");

    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(config) => {
                info!(path = %path.display(), "Configuration loaded");
                config
            }
            Err(e) => {
                warn!("Invalid configuration, using defaults: {e}");
                BoothConfig::default()
            }
        },
        Err(_) => BoothConfig::default(),
    }
}

/// Forward engine events to every window until the engine shuts down.
fn forward_events(app: tauri::AppHandle, event_rx: Receiver<BoothEvent>) {
    for event in event_rx {
        if let Err(e) = app.emit(BOOTH_EVENT, &event) {
            warn!("Failed to forward event: {e}");
        }
        if matches!(event, BoothEvent::Shutdown) {
            break;
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();
    info!("Fotobox starting");

    let config = load_config();

    // Create IPC channels
    let (command_tx, command_rx) = command_channel();
    let (event_tx, event_rx) = event_channel();

    // Start engine in background thread
    thread::spawn(move || {
        let mut booth = Booth::new(command_rx, event_tx, config);
        booth.run();
    });

    // Create app state
    let state = AppState {
        command_tx: command_tx.clone(),
    };

    tauri::Builder::default()
        .manage(state)
        .setup(move |app| {
            let main = app
                .get_webview_window("main")
                .ok_or("main window missing")?;
            let overlay = app
                .get_webview_window("overlay")
                .ok_or("overlay window missing")?;

            // Keep the overlay glued to the preview window.
            if let (Ok(position), Ok(size)) = (main.outer_position(), main.inner_size()) {
                let _ = overlay.set_position(position);
                let _ = overlay.set_size(size);
            }

            let overlay_sync = overlay.clone();
            let shutdown_tx = command_tx.clone();
            main.on_window_event(move |event| match event {
                tauri::WindowEvent::Moved(position) => {
                    let _ = overlay_sync.set_position(*position);
                }
                tauri::WindowEvent::Resized(size) => {
                    let _ = overlay_sync.set_size(*size);
                }
                tauri::WindowEvent::CloseRequested { .. } => {
                    let _ = shutdown_tx.send(BoothCommand::Shutdown);
                }
                _ => {}
            });

            // Re-emit engine events to both windows.
            let handle = app.handle().clone();
            thread::spawn(move || forward_events(handle, event_rx));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::start_capture,
            commands::print_photo,
            commands::get_camera_devices,
            commands::get_state,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
