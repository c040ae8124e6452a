//! Main booth orchestrator.
//!
//! The booth loop is the single consumer for every input source: UI
//! commands, camera frames, and countdown ticks. Frame delivery happens on
//! the camera's own thread, but frames only ever touch workflow state from
//! this loop, which replaces UI-thread marshaling as the synchronization
//! discipline.

use std::time::{Duration, Instant};

use crossbeam_channel::{never, select, Receiver, Sender};
use tracing::{debug, info, instrument, warn};

use fotobox_capture::{enumerate_cameras, CameraSession, CapturedFrame, FrameSource};
use fotobox_ipc::{BoothCommand, BoothConfig, BoothEvent, BoothState};
use fotobox_print::CupsPrintSink;

use crate::workflow::{Workflow, WorkflowInput};

/// Countdown tick interval.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Idle poll interval when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// The booth engine.
pub struct Booth {
    command_rx: Receiver<BoothCommand>,
    event_tx: Sender<BoothEvent>,
    workflow: Workflow,
    config: BoothConfig,
    camera: Option<CameraSession>,
    frame_rx: Option<Receiver<CapturedFrame>>,
    next_tick: Option<Instant>,
    last_preview: Option<Instant>,
}

impl Booth {
    /// Create a new booth engine.
    pub fn new(
        command_rx: Receiver<BoothCommand>,
        event_tx: Sender<BoothEvent>,
        config: BoothConfig,
    ) -> Self {
        let workflow = Workflow::new(config.clone(), Box::new(CupsPrintSink), event_tx.clone());

        Self {
            command_rx,
            event_tx,
            workflow,
            config,
            camera: None,
            frame_rx: None,
            next_tick: None,
            last_preview: None,
        }
    }

    /// Run the booth (blocking).
    #[instrument(name = "booth_run", skip(self))]
    pub fn run(&mut self) {
        info!("Booth engine starting");
        self.send_event(BoothEvent::Ready);

        loop {
            let command_rx = self.command_rx.clone();
            let frame_rx = self.frame_rx.clone().unwrap_or_else(never);
            let timeout = self.poll_timeout();

            select! {
                recv(command_rx) -> msg => match msg {
                    Ok(command) => {
                        if !self.handle_command(command) {
                            break;
                        }
                    }
                    Err(_) => {
                        info!("Command channel disconnected, shutting down");
                        break;
                    }
                },
                recv(frame_rx) -> msg => match msg {
                    Ok(frame) => self.ingest_frame(frame),
                    Err(_) => {
                        warn!("Frame channel disconnected");
                        self.frame_rx = None;
                    }
                },
                default(timeout) => self.handle_timer(),
            }
        }

        self.stop_camera();
        info!("Booth engine stopped");
    }

    /// Handle a command. Returns false if the booth should stop.
    fn handle_command(&mut self, command: BoothCommand) -> bool {
        debug!(?command, "Handling command");

        match command {
            BoothCommand::StartCapture => self.start_capture(),
            BoothCommand::Print => self.workflow.apply(WorkflowInput::PrintRequested),
            BoothCommand::GetCameraDevices => self.send_camera_devices(),
            BoothCommand::GetState => self.send_state(),
            BoothCommand::Shutdown => {
                self.send_event(BoothEvent::Shutdown);
                return false;
            }
        }

        true
    }

    /// Begin a capture cycle, acquiring the camera first if needed.
    #[instrument(name = "start_capture", skip(self))]
    fn start_capture(&mut self) {
        if self.camera.is_none() {
            if let Err(e) = self.start_camera() {
                warn!("Camera start failed: {e}");
                self.send_event(BoothEvent::Error {
                    recoverable: true,
                    message: e,
                });
                return;
            }
        }

        self.workflow.apply(WorkflowInput::CaptureRequested);

        if self.workflow.state().is_counting_down() && self.next_tick.is_none() {
            self.next_tick = Some(Instant::now() + TICK_INTERVAL);
        }
    }

    fn start_camera(&mut self) -> Result<(), String> {
        let devices = enumerate_cameras().map_err(|e| e.to_string())?;

        let device_id = self
            .config
            .camera_device
            .clone()
            .unwrap_or_else(|| devices[0].id.clone());

        info!(device = %device_id, "Acquiring camera");

        let mut session = CameraSession::new(&device_id);
        let frame_rx = session.start().map_err(|e| e.to_string())?;

        self.camera = Some(session);
        self.frame_rx = Some(frame_rx);

        Ok(())
    }

    /// Signal-to-stop on the camera; failures are logged and dropped.
    fn stop_camera(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop() {
                warn!("Camera stop failed: {e}");
            }
        }
        self.frame_rx = None;
    }

    /// Marshal one delivered frame into the workflow and feed the preview.
    fn ingest_frame(&mut self, frame: CapturedFrame) {
        self.send_preview(&frame);
        self.workflow.apply(WorkflowInput::FrameArrived(frame));
    }

    /// Forward a rate-limited, JPEG-encoded preview to the UI. Delivery is
    /// best-effort; failures are logged and dropped.
    fn send_preview(&mut self, frame: &CapturedFrame) {
        let interval = Duration::from_millis(self.config.preview_interval_ms);
        if let Some(last) = self.last_preview {
            if last.elapsed() < interval {
                return;
            }
        }

        let image = match fotobox_compose::image_from_raw(frame.width, frame.height, &frame.data) {
            Ok(image) => image,
            Err(e) => {
                warn!("Preview conversion failed: {e}");
                return;
            }
        };

        match fotobox_compose::encode_jpeg(&image, self.config.jpeg_quality) {
            Ok(data) => {
                self.last_preview = Some(Instant::now());
                self.send_event(BoothEvent::PreviewFrame {
                    width: frame.width,
                    height: frame.height,
                    data,
                });
            }
            Err(e) => warn!("Preview encode failed: {e}"),
        }
    }

    fn poll_timeout(&self) -> Duration {
        match self.next_tick {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => IDLE_POLL,
        }
    }

    /// Fire a countdown tick when its deadline has passed.
    fn handle_timer(&mut self) {
        let Some(deadline) = self.next_tick else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }

        // Apply any frames still queued so the capture step sees the most
        // recent one.
        self.drain_frames();

        self.workflow.apply(WorkflowInput::Tick);

        self.next_tick = if self.workflow.state().is_counting_down() {
            Some(deadline + TICK_INTERVAL)
        } else {
            None
        };
    }

    fn drain_frames(&mut self) {
        let Some(frame_rx) = self.frame_rx.clone() else {
            return;
        };
        while let Ok(frame) = frame_rx.try_recv() {
            self.ingest_frame(frame);
        }
    }

    fn send_camera_devices(&self) {
        match enumerate_cameras() {
            Ok(devices) => self.send_event(BoothEvent::CameraDevices(devices)),
            Err(e) => {
                warn!("Camera enumeration failed: {e}");
                self.send_event(BoothEvent::Error {
                    recoverable: true,
                    message: e.to_string(),
                });
            }
        }
    }

    fn send_state(&self) {
        let state: BoothState = self.workflow.state().clone();
        self.send_event(BoothEvent::StateChanged {
            previous: Box::new(state.clone()),
            current: Box::new(state),
        });
    }

    fn send_event(&self, event: BoothEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("Failed to send event: {e}");
        }
    }
}

impl Drop for Booth {
    fn drop(&mut self) {
        self.stop_camera();
    }
}
