// SPDX-License-Identifier: GPL-3.0-only

//! Scan loop controller
//!
//! Drives one scan session: open the camera lazily, pull one frame per
//! step, hand it to the detector, and either return the frame for preview
//! or store the decoded text and stop.
//!
//! The controller never loops by itself. The caller runs [`Scanner::step`]
//! again after a short delay whenever it returns [`StepOutcome::Preview`],
//! which keeps every step a bounded unit of work on the calling thread.
//!
//! ```text
//!          start()               Found
//!   Idle ─────────► Scanning ─────────────► Found
//!    ▲                │  ▲ │
//!    │     stop()     │  └─┘ Preview (reschedule)
//!    └────────────────┤
//!                     │ camera open/read failed
//!                     └───────────────────► CameraError
//! ```

use crate::app::frame_processor::Detector;
use crate::backends::camera::{CameraBackend, CameraFrame, CameraSource};
use crate::errors::{ActionError, CameraError};
use tracing::{debug, info, warn};

/// Where the scan state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Not scanning, nothing attempted yet or stopped by the user
    #[default]
    Idle,
    /// Steps are being scheduled
    Scanning,
    /// A code was decoded, the result is available
    Found,
    /// The last attempt ended because the camera failed
    CameraError,
}

/// Identifies one scan run
///
/// Every `start()` issues a new ticket. Steps scheduled by an earlier run
/// carry an old ticket and are ignored, so a quick Stop → Start never ends
/// up with two step chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTicket(u64);

/// What a single step produced
#[derive(Debug)]
pub enum StepOutcome {
    /// Scanning was stopped or restarted since this step was scheduled
    Stale,
    /// No code in this frame; render it and schedule another step
    Preview(CameraFrame),
    /// A code was decoded; scanning has stopped and the camera is released
    Found(String),
    /// The camera could not be opened or read; scanning has stopped
    CameraError(CameraError),
}

/// Enabled state of the Start/Stop controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

/// The single scan session record
///
/// Invariant: `camera` is `Some` only while `is_scanning` is true.
#[derive(Default)]
pub struct ScanSession {
    is_scanning: bool,
    camera: Option<Box<dyn CameraSource>>,
    last_result: Option<String>,
    generation: u64,
}

impl std::fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSession")
            .field("is_scanning", &self.is_scanning)
            .field("camera_open", &self.camera.is_some())
            .field("last_result", &self.last_result)
            .field("generation", &self.generation)
            .finish()
    }
}

impl ScanSession {
    /// Drop the camera handle, closing the device
    fn release_camera(&mut self) {
        if self.camera.take().is_some() {
            debug!("Camera handle dropped");
        }
    }

    /// Leave the scanning state and release the camera
    fn halt(&mut self) {
        self.is_scanning = false;
        self.release_camera();
    }
}

/// Scan loop controller owning the session, camera backend and detector
pub struct Scanner {
    session: ScanSession,
    state: ScanState,
    backend: Box<dyn CameraBackend>,
    detector: Box<dyn Detector>,
    frames_scanned: u64,
}

impl Scanner {
    pub fn new(backend: Box<dyn CameraBackend>, detector: Box<dyn Detector>) -> Self {
        Self {
            session: ScanSession::default(),
            state: ScanState::Idle,
            backend,
            detector,
            frames_scanned: 0,
        }
    }

    /// Begin a new scan run
    ///
    /// Returns `None` (and changes nothing) when already scanning. The
    /// caller runs the first step with the returned ticket right away.
    pub fn start(&mut self) -> Option<ScanTicket> {
        if self.session.is_scanning {
            debug!("Start ignored, already scanning");
            return None;
        }

        self.session.last_result = None;
        self.session.is_scanning = true;
        self.session.generation += 1;
        self.state = ScanState::Scanning;
        self.frames_scanned = 0;

        info!(run = self.session.generation, "Scanning started");
        Some(ScanTicket(self.session.generation))
    }

    /// Stop the current run and release the camera
    ///
    /// Returns `false` (and changes nothing) when not scanning. A step
    /// that is already scheduled becomes stale.
    pub fn stop(&mut self) -> bool {
        if !self.session.is_scanning {
            debug!("Stop ignored, not scanning");
            return false;
        }

        self.session.halt();
        self.state = ScanState::Idle;
        info!(frames = self.frames_scanned, "Scanning stopped");
        true
    }

    /// Run one scan step: read a frame and look for a code
    pub fn step(&mut self, ticket: ScanTicket) -> StepOutcome {
        if !self.session.is_scanning || ticket.0 != self.session.generation {
            return StepOutcome::Stale;
        }

        let frame = match self.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Camera unavailable, scanning halted");
                self.session.halt();
                self.state = ScanState::CameraError;
                return StepOutcome::CameraError(e);
            }
        };
        self.frames_scanned += 1;

        let decoded = self
            .detector
            .detect(&frame)
            .into_iter()
            .map(|detection| detection.content)
            .find(|content| !content.is_empty());

        match decoded {
            Some(text) => {
                info!(
                    frames = self.frames_scanned,
                    length = text.len(),
                    "QR code decoded"
                );
                self.session.last_result = Some(text.clone());
                self.session.halt();
                self.state = ScanState::Found;
                StepOutcome::Found(text)
            }
            None => StepOutcome::Preview(frame),
        }
    }

    /// Read from the open camera, opening it first if needed
    fn read_frame(&mut self) -> Result<CameraFrame, CameraError> {
        let camera = match self.session.camera.take() {
            Some(camera) => camera,
            None => {
                info!("Opening camera");
                self.backend.open()?
            }
        };
        self.session.camera.insert(camera).read_frame()
    }

    /// Replace the camera backend, e.g. after the device setting changed
    ///
    /// An open camera is kept until the current run ends.
    pub fn set_backend(&mut self, backend: Box<dyn CameraBackend>) {
        self.backend = backend;
    }

    /// Replace the detector, e.g. after detection settings changed
    pub fn set_detector(&mut self, detector: Box<dyn Detector>) {
        self.detector = detector;
    }

    pub fn is_scanning(&self) -> bool {
        self.session.is_scanning
    }

    pub fn is_camera_open(&self) -> bool {
        self.session.camera.is_some()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Decoded text of the last successful scan, if any
    pub fn last_result(&self) -> Option<&str> {
        self.session.last_result.as_deref()
    }

    /// Frames examined in the current or last run
    pub fn frames_scanned(&self) -> u64 {
        self.frames_scanned
    }

    pub fn controls(&self) -> ControlState {
        ControlState {
            start_enabled: !self.session.is_scanning,
            stop_enabled: self.session.is_scanning,
        }
    }

    /// Text for the Copy action
    pub fn copy_text(&self) -> Result<&str, ActionError> {
        self.non_empty_result()
    }

    /// Link for the Open action, passed on without validation
    pub fn link(&self) -> Result<&str, ActionError> {
        self.non_empty_result()
    }

    fn non_empty_result(&self) -> Result<&str, ActionError> {
        self.last_result()
            .filter(|text| !text.is_empty())
            .ok_or(ActionError::NoData)
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("frames_scanned", &self.frames_scanned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::frame_processor::{FrameRegion, QrDetection};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Counters {
        opened: usize,
        open_now: usize,
    }

    struct FakeCamera(Arc<Mutex<Counters>>);

    impl CameraSource for FakeCamera {
        fn read_frame(&mut self) -> Result<CameraFrame, CameraError> {
            Ok(CameraFrame::from_rgba(2, 2, vec![0; 16]))
        }
    }

    impl Drop for FakeCamera {
        fn drop(&mut self) {
            self.0.lock().unwrap().open_now -= 1;
        }
    }

    struct FakeBackend(Arc<Mutex<Counters>>);

    impl CameraBackend for FakeBackend {
        fn open(&self) -> Result<Box<dyn CameraSource>, CameraError> {
            let mut counters = self.0.lock().unwrap();
            counters.opened += 1;
            counters.open_now += 1;
            Ok(Box::new(FakeCamera(Arc::clone(&self.0))))
        }
    }

    struct FailingBackend;

    impl CameraBackend for FailingBackend {
        fn open(&self) -> Result<Box<dyn CameraSource>, CameraError> {
            Err(CameraError::InitializationFailed("no device".into()))
        }
    }

    /// Returns queued answers, then nothing
    struct ScriptedDetector(Mutex<VecDeque<&'static str>>);

    impl Detector for ScriptedDetector {
        fn detect(&self, _frame: &CameraFrame) -> Vec<QrDetection> {
            match self.0.lock().unwrap().pop_front() {
                Some("") | None => Vec::new(),
                Some(text) => vec![QrDetection::new(
                    FrameRegion::from_pixels(0, 0, 1, 1, 2, 2),
                    text.to_string(),
                )],
            }
        }
    }

    fn scanner(script: &[&'static str]) -> (Scanner, Arc<Mutex<Counters>>) {
        let counters = Arc::new(Mutex::new(Counters::default()));
        let scanner = Scanner::new(
            Box::new(FakeBackend(Arc::clone(&counters))),
            Box::new(ScriptedDetector(Mutex::new(script.iter().copied().collect()))),
        );
        (scanner, counters)
    }

    #[test]
    fn test_camera_opens_lazily() {
        let (mut scanner, counters) = scanner(&[]);
        let ticket = scanner.start().unwrap();
        assert!(!scanner.is_camera_open());

        assert!(matches!(scanner.step(ticket), StepOutcome::Preview(_)));
        assert!(scanner.is_camera_open());
        assert_eq!(counters.lock().unwrap().opened, 1);

        // Further steps reuse the handle
        scanner.step(ticket);
        assert_eq!(counters.lock().unwrap().opened, 1);
    }

    #[test]
    fn test_found_on_fourth_frame() {
        let (mut scanner, counters) = scanner(&["", "", "", "HELLO"]);
        let ticket = scanner.start().unwrap();

        for _ in 0..3 {
            assert!(matches!(scanner.step(ticket), StepOutcome::Preview(_)));
        }
        match scanner.step(ticket) {
            StepOutcome::Found(text) => assert_eq!(text, "HELLO"),
            other => panic!("expected Found, got {:?}", other),
        }

        assert!(!scanner.is_scanning());
        assert_eq!(scanner.state(), ScanState::Found);
        assert_eq!(scanner.last_result(), Some("HELLO"));
        assert_eq!(counters.lock().unwrap().open_now, 0);
        assert_eq!(
            scanner.controls(),
            ControlState {
                start_enabled: true,
                stop_enabled: false
            }
        );
        assert_eq!(scanner.frames_scanned(), 4);
    }

    #[test]
    fn test_camera_failure_halts() {
        let mut scanner = Scanner::new(
            Box::new(FailingBackend),
            Box::new(ScriptedDetector(Mutex::new(VecDeque::new()))),
        );
        let ticket = scanner.start().unwrap();

        assert!(matches!(
            scanner.step(ticket),
            StepOutcome::CameraError(CameraError::InitializationFailed(_))
        ));
        assert!(!scanner.is_scanning());
        assert!(!scanner.is_camera_open());
        assert_eq!(scanner.state(), ScanState::CameraError);

        // No further steps are taken for this run
        assert!(matches!(scanner.step(ticket), StepOutcome::Stale));
    }

    #[test]
    fn test_start_while_scanning_is_noop() {
        let (mut scanner, counters) = scanner(&[]);
        let ticket = scanner.start().unwrap();
        scanner.step(ticket);
        let controls = scanner.controls();

        assert!(scanner.start().is_none());
        assert!(scanner.is_scanning());
        assert!(scanner.is_camera_open());
        assert_eq!(scanner.controls(), controls);
        assert_eq!(counters.lock().unwrap().opened, 1);

        // The original run keeps going
        assert!(matches!(scanner.step(ticket), StepOutcome::Preview(_)));
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let (mut scanner, _) = scanner(&[]);
        assert!(!scanner.stop());
        assert_eq!(scanner.state(), ScanState::Idle);
        assert_eq!(
            scanner.controls(),
            ControlState {
                start_enabled: true,
                stop_enabled: false
            }
        );
    }

    #[test]
    fn test_stop_releases_camera_and_stales_pending_step() {
        let (mut scanner, counters) = scanner(&[]);
        let ticket = scanner.start().unwrap();
        scanner.step(ticket);

        assert!(scanner.stop());
        assert!(!scanner.is_camera_open());
        assert_eq!(counters.lock().unwrap().open_now, 0);
        assert!(matches!(scanner.step(ticket), StepOutcome::Stale));
        assert_eq!(counters.lock().unwrap().opened, 1);
    }

    #[test]
    fn test_old_ticket_is_stale_after_restart() {
        let (mut scanner, counters) = scanner(&[]);
        let first = scanner.start().unwrap();
        scanner.step(first);
        scanner.stop();

        let second = scanner.start().unwrap();
        assert_ne!(first, second);
        assert!(matches!(scanner.step(first), StepOutcome::Stale));
        assert!(matches!(scanner.step(second), StepOutcome::Preview(_)));
        assert_eq!(counters.lock().unwrap().open_now, 1);
    }

    #[test]
    fn test_start_clears_previous_result() {
        let (mut scanner, _) = scanner(&["FIRST"]);
        let ticket = scanner.start().unwrap();
        scanner.step(ticket);
        assert_eq!(scanner.last_result(), Some("FIRST"));

        scanner.start().unwrap();
        assert_eq!(scanner.last_result(), None);
        assert_eq!(scanner.copy_text(), Err(ActionError::NoData));
    }

    #[test]
    fn test_actions_without_result() {
        let (scanner, _) = scanner(&[]);
        assert_eq!(scanner.copy_text(), Err(ActionError::NoData));
        assert_eq!(scanner.link(), Err(ActionError::NoData));
    }

    #[test]
    fn test_link_is_passed_through() {
        let (mut scanner, _) = scanner(&["not a url at all"]);
        let ticket = scanner.start().unwrap();
        scanner.step(ticket);
        assert_eq!(scanner.link(), Ok("not a url at all"));
    }

    #[test]
    fn test_at_most_one_camera_for_any_start_stop_sequence() {
        let (mut scanner, counters) = scanner(&[]);
        // 1 = start + step, 0 = stop
        let sequence = [1, 1, 0, 0, 1, 0, 1, 1, 1, 0, 1, 0, 0, 1];
        let mut ticket = None;

        for op in sequence {
            if op == 1 {
                if let Some(t) = scanner.start() {
                    ticket = Some(t);
                }
                if let Some(t) = ticket {
                    scanner.step(t);
                }
            } else {
                scanner.stop();
            }

            let open_now = counters.lock().unwrap().open_now;
            assert!(open_now <= 1);
            if !scanner.is_scanning() {
                assert_eq!(open_now, 0);
            }
        }
    }
}
