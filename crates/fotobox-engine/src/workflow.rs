//! The capture workflow state machine.
//!
//! All mutable capture state lives here: the latest buffered frame, the
//! countdown, the current photo, and the printer rotation. Inputs arrive
//! as [`WorkflowInput`] values applied by a single consumer, so no locking
//! is needed.

use std::fs;

use crossbeam_channel::Sender;
use tracing::{debug, error, info, warn};

use fotobox_capture::CapturedFrame;
use fotobox_ipc::{BoothConfig, BoothEvent, BoothState, PhotoInfo, RotationPolicy};
use fotobox_print::{PrintError, PrintSink, PrinterRotation};

/// Inputs consumed by the workflow.
#[derive(Debug)]
pub enum WorkflowInput {
    /// The capture button was pressed.
    CaptureRequested,

    /// One second of countdown elapsed.
    Tick,

    /// A frame was delivered by the camera.
    FrameArrived(CapturedFrame),

    /// The print button was pressed.
    PrintRequested,
}

/// The capture workflow.
pub struct Workflow {
    state: BoothState,
    latest_frame: Option<CapturedFrame>,
    current_photo: Option<PhotoInfo>,
    rotation: PrinterRotation,
    sink: Box<dyn PrintSink>,
    event_tx: Sender<BoothEvent>,
    config: BoothConfig,
}

impl Workflow {
    /// Create a new workflow.
    pub fn new(config: BoothConfig, sink: Box<dyn PrintSink>, event_tx: Sender<BoothEvent>) -> Self {
        Self {
            state: BoothState::Idle,
            latest_frame: None,
            current_photo: None,
            rotation: PrinterRotation::new(config.printers.clone()),
            sink,
            event_tx,
            config,
        }
    }

    /// The current workflow state.
    pub fn state(&self) -> &BoothState {
        &self.state
    }

    /// Apply one input to the state machine.
    pub fn apply(&mut self, input: WorkflowInput) {
        match input {
            WorkflowInput::CaptureRequested => self.start_countdown(),
            WorkflowInput::Tick => self.handle_tick(),
            WorkflowInput::FrameArrived(frame) => self.ingest_frame(frame),
            WorkflowInput::PrintRequested => self.print_photo(),
        }
    }

    /// Begin a countdown, discarding any previous photo reference.
    fn start_countdown(&mut self) {
        match self.state {
            BoothState::Idle | BoothState::Ready { .. } => {
                let start = self.config.countdown_start;
                info!(start, "Starting capture countdown");

                self.current_photo = None;
                self.transition_to(BoothState::CountingDown { remaining: start });
                self.send_event(BoothEvent::CountdownTick { remaining: start });
            }
            BoothState::CountingDown { .. } | BoothState::Capturing => {
                debug!("Capture already in progress, ignoring request");
            }
        }
    }

    fn handle_tick(&mut self) {
        let BoothState::CountingDown { remaining } = self.state else {
            debug!("Tick outside countdown, ignoring");
            return;
        };

        let next = remaining.saturating_sub(1);
        if next > 0 {
            self.transition_to(BoothState::CountingDown { remaining: next });
            self.send_event(BoothEvent::CountdownTick { remaining: next });
        } else {
            self.send_event(BoothEvent::CountdownFinished);
            self.transition_to(BoothState::Capturing);
            self.take_photo();
        }
    }

    /// Replace the latest-frame buffer. Only the most recent frame is ever
    /// visible to the capture step.
    fn ingest_frame(&mut self, frame: CapturedFrame) {
        self.latest_frame = Some(frame);
    }

    /// Composite and persist the latest frame, or fall back to `Idle` when
    /// no frame was ever delivered.
    fn take_photo(&mut self) {
        let Some(frame) = self.latest_frame.clone() else {
            warn!("Countdown expired with no frame received, no photo produced");
            self.transition_to(BoothState::Idle);
            return;
        };

        match self.compose_and_store(&frame) {
            Ok((photo, data)) => {
                info!(
                    sequence = photo.sequence,
                    path = %photo.path.display(),
                    "Photo captured"
                );
                self.current_photo = Some(photo.clone());
                self.transition_to(BoothState::Ready {
                    photo: photo.clone(),
                });
                self.send_event(BoothEvent::PhotoCaptured { photo, data });
            }
            Err(e) => {
                error!("Photo composition failed: {e}");
                self.send_event(BoothEvent::Error {
                    recoverable: true,
                    message: e,
                });
                self.transition_to(BoothState::Idle);
            }
        }
    }

    fn compose_and_store(&self, frame: &CapturedFrame) -> Result<(PhotoInfo, Vec<u8>), String> {
        let image = fotobox_compose::image_from_raw(frame.width, frame.height, &frame.data)
            .map_err(|e| format!("Frame conversion failed: {e}"))?;

        let photo = fotobox_compose::add_frame(&image);

        fotobox_compose::save_jpeg(&photo, &self.config.photo_path, self.config.jpeg_quality)
            .map_err(|e| format!("Photo write failed: {e}"))?;

        // Read the persisted file back so the UI previews exactly what
        // would be printed.
        let data = fs::read(&self.config.photo_path)
            .map_err(|e| format!("Photo readback failed: {e}"))?;

        let info = PhotoInfo {
            path: self.config.photo_path.clone(),
            width: frame.width,
            height: frame.height,
            sequence: frame.sequence,
        };

        Ok((info, data))
    }

    /// Submit the current photo to the next printer in rotation.
    fn print_photo(&mut self) {
        let Some(photo) = self.current_photo.clone() else {
            warn!("Print requested with no photo available");
            self.send_event(BoothEvent::Error {
                recoverable: true,
                message: "No photo available to print".to_string(),
            });
            return;
        };

        let Some(printer) = self.rotation.current().map(str::to_string) else {
            warn!("Print requested with no printer configured");
            self.send_event(BoothEvent::Error {
                recoverable: true,
                message: PrintError::NoPrinterConfigured.to_string(),
            });
            return;
        };

        match self.sink.submit(&printer, &photo.path) {
            Ok(()) => {
                info!(printer, "Photo sent to printer");
                self.send_event(BoothEvent::PhotoPrinted {
                    printer: printer.clone(),
                });
                self.rotation.advance();
            }
            Err(e) => {
                warn!(printer, "Print submission failed: {e}");
                self.send_event(BoothEvent::Error {
                    recoverable: true,
                    message: format!("Print on {printer} failed: {e}"),
                });
                if self.config.rotation_policy == RotationPolicy::AdvanceAlways {
                    self.rotation.advance();
                }
            }
        }
    }

    fn transition_to(&mut self, new_state: BoothState) {
        let previous = std::mem::replace(&mut self.state, new_state.clone());

        debug!(
            previous = previous.name(),
            current = new_state.name(),
            "State transition"
        );

        self.send_event(BoothEvent::StateChanged {
            previous: Box::new(previous),
            current: Box::new(new_state),
        });
    }

    fn send_event(&self, event: BoothEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("Failed to send event: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use bytes::Bytes;
    use crossbeam_channel::Receiver;
    use parking_lot::Mutex;

    use fotobox_print::PrintResult;

    struct RecordingSink {
        submissions: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl PrintSink for RecordingSink {
        fn submit(&mut self, printer: &str, _photo: &Path) -> PrintResult<()> {
            self.submissions.lock().push(printer.to_string());
            if self.fail {
                return Err(PrintError::SubmissionFailed {
                    printer: printer.to_string(),
                    message: "printer offline".to_string(),
                });
            }
            Ok(())
        }
    }

    struct Harness {
        workflow: Workflow,
        events: Receiver<BoothEvent>,
        submissions: Arc<Mutex<Vec<String>>>,
        photo_path: PathBuf,
    }

    fn harness(test_name: &str, fail_sink: bool, policy: RotationPolicy) -> Harness {
        let photo_path = std::env::temp_dir().join(format!("fotobox-workflow-{test_name}.jpg"));
        let _ = std::fs::remove_file(&photo_path);

        let config = BoothConfig {
            photo_path: photo_path.clone(),
            rotation_policy: policy,
            ..BoothConfig::default()
        };

        let submissions = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink {
            submissions: Arc::clone(&submissions),
            fail: fail_sink,
        };

        let (event_tx, events) = fotobox_ipc::event_channel();
        let workflow = Workflow::new(config, Box::new(sink), event_tx);

        Harness {
            workflow,
            events,
            submissions,
            photo_path,
        }
    }

    fn test_frame(sequence: u64, shade: u8) -> CapturedFrame {
        let (width, height) = (64u32, 48u32);
        let data = vec![shade; (width * height * 3) as usize];
        CapturedFrame::new(Bytes::from(data), width, height, sequence)
    }

    fn drain(events: &Receiver<BoothEvent>) -> Vec<BoothEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    fn run_full_countdown(workflow: &mut Workflow) {
        workflow.apply(WorkflowInput::CaptureRequested);
        for _ in 0..3 {
            workflow.apply(WorkflowInput::Tick);
        }
    }

    #[test]
    fn test_countdown_display_sequence() {
        let mut h = harness("countdown", false, RotationPolicy::AdvanceAlways);
        run_full_countdown(&mut h.workflow);

        let events = drain(&h.events);
        let ticks: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                BoothEvent::CountdownTick { remaining } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(ticks, [3, 2, 1]);

        let finished = events
            .iter()
            .any(|e| matches!(e, BoothEvent::CountdownFinished));
        assert!(finished);
    }

    #[test]
    fn test_no_frame_capture_returns_to_idle() {
        let mut h = harness("no-frame", false, RotationPolicy::AdvanceAlways);
        run_full_countdown(&mut h.workflow);

        assert!(h.workflow.state().is_idle());
        assert!(!h.photo_path.exists());

        let events = drain(&h.events);
        assert!(!events
            .iter()
            .any(|e| matches!(e, BoothEvent::PhotoCaptured { .. })));
        assert!(!events.iter().any(|e| matches!(e, BoothEvent::Error { .. })));
    }

    #[test]
    fn test_latest_frame_wins() {
        let mut h = harness("latest-frame", false, RotationPolicy::AdvanceAlways);

        h.workflow.apply(WorkflowInput::CaptureRequested);
        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(1, 10)));
        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(2, 20)));
        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(3, 30)));
        for _ in 0..3 {
            h.workflow.apply(WorkflowInput::Tick);
        }

        assert!(h.workflow.state().is_ready());
        let events = drain(&h.events);
        let captured = events.iter().find_map(|e| match e {
            BoothEvent::PhotoCaptured { photo, .. } => Some(photo.clone()),
            _ => None,
        });
        assert_eq!(captured.unwrap().sequence, 3);
        assert!(h.photo_path.exists());

        let _ = std::fs::remove_file(&h.photo_path);
    }

    #[test]
    fn test_capture_request_ignored_while_counting() {
        let mut h = harness("reentrant-counting", false, RotationPolicy::AdvanceAlways);

        h.workflow.apply(WorkflowInput::CaptureRequested);
        h.workflow.apply(WorkflowInput::Tick);
        h.workflow.apply(WorkflowInput::CaptureRequested);

        // The second request must not reset the countdown.
        match h.workflow.state() {
            BoothState::CountingDown { remaining } => assert_eq!(*remaining, 2),
            other => panic!("unexpected state {}", other.name()),
        }
    }

    #[test]
    fn test_reentrant_capture_discards_photo() {
        let mut h = harness("reentrant-ready", false, RotationPolicy::AdvanceAlways);

        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(1, 40)));
        run_full_countdown(&mut h.workflow);
        assert!(h.workflow.state().is_ready());

        // New cycle discards the Ready photo.
        h.workflow.apply(WorkflowInput::CaptureRequested);
        match h.workflow.state() {
            BoothState::CountingDown { remaining } => assert_eq!(*remaining, 3),
            other => panic!("unexpected state {}", other.name()),
        }

        // A print mid-cycle is guarded, not a crash.
        drain(&h.events);
        h.workflow.apply(WorkflowInput::PrintRequested);
        let events = drain(&h.events);
        assert!(events.iter().any(|e| matches!(e, BoothEvent::Error { .. })));
        assert!(h.submissions.lock().is_empty());

        let _ = std::fs::remove_file(&h.photo_path);
    }

    #[test]
    fn test_print_without_photo_is_guarded() {
        let mut h = harness("print-no-photo", false, RotationPolicy::AdvanceAlways);

        h.workflow.apply(WorkflowInput::PrintRequested);

        let events = drain(&h.events);
        assert!(events.iter().any(|e| matches!(e, BoothEvent::Error { .. })));
        assert!(h.submissions.lock().is_empty());
        assert!(h.workflow.state().is_idle());
    }

    #[test]
    fn test_print_rotation_alternates() {
        let mut h = harness("rotation", false, RotationPolicy::AdvanceAlways);

        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(1, 50)));
        run_full_countdown(&mut h.workflow);

        for _ in 0..4 {
            h.workflow.apply(WorkflowInput::PrintRequested);
        }

        assert_eq!(
            *h.submissions.lock(),
            ["Drucker1", "Drucker2", "Drucker1", "Drucker2"]
        );

        let _ = std::fs::remove_file(&h.photo_path);
    }

    #[test]
    fn test_failed_print_advances_rotation() {
        let mut h = harness("rotation-fail", true, RotationPolicy::AdvanceAlways);

        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(1, 60)));
        run_full_countdown(&mut h.workflow);

        h.workflow.apply(WorkflowInput::PrintRequested);
        h.workflow.apply(WorkflowInput::PrintRequested);

        assert_eq!(*h.submissions.lock(), ["Drucker1", "Drucker2"]);

        let events = drain(&h.events);
        assert!(!events.iter().any(|e| matches!(e, BoothEvent::PhotoPrinted { .. })));

        let _ = std::fs::remove_file(&h.photo_path);
    }

    #[test]
    fn test_failed_print_holds_rotation_under_policy() {
        let mut h = harness("rotation-hold", true, RotationPolicy::HoldOnFailure);

        h.workflow.apply(WorkflowInput::FrameArrived(test_frame(1, 70)));
        run_full_countdown(&mut h.workflow);

        h.workflow.apply(WorkflowInput::PrintRequested);
        h.workflow.apply(WorkflowInput::PrintRequested);

        assert_eq!(*h.submissions.lock(), ["Drucker1", "Drucker1"]);

        let _ = std::fs::remove_file(&h.photo_path);
    }
}
