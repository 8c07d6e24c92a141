// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end scan loop tests with a scripted camera and the real detector

use qrcodegen::{QrCode, QrCodeEcc};
use qrscanner::{
    CameraBackend, CameraError, CameraFrame, CameraSource, QrDetector, ScanState, Scanner,
    StepOutcome,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

fn qr_frame(text: &str) -> CameraFrame {
    let qr = QrCode::encode_text(text, QrCodeEcc::Medium).unwrap();
    let module_px = 5;
    let border = 4;
    let side = (qr.size() + border * 2) as u32 * module_px;

    let mut pixels = Vec::with_capacity((side * side * 4) as usize);
    for y in 0..side {
        for x in 0..side {
            let mx = (x / module_px) as i32 - border;
            let my = (y / module_px) as i32 - border;
            let v = if qr.get_module(mx, my) { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    CameraFrame::from_rgba(side, side, pixels)
}

fn blank_frame() -> CameraFrame {
    CameraFrame::from_rgba(64, 64, vec![255; 64 * 64 * 4])
}

/// Plays back frames, then fails like an unplugged device
struct ReplayCamera(VecDeque<CameraFrame>);

impl CameraSource for ReplayCamera {
    fn read_frame(&mut self) -> Result<CameraFrame, CameraError> {
        self.0
            .pop_front()
            .ok_or_else(|| CameraError::ReadFailed("device disconnected".into()))
    }
}

struct ReplayBackend {
    frames: Mutex<Option<Vec<CameraFrame>>>,
    opens: Arc<Mutex<u32>>,
}

impl ReplayBackend {
    fn new(frames: Vec<CameraFrame>) -> (Self, Arc<Mutex<u32>>) {
        let opens = Arc::new(Mutex::new(0));
        let backend = Self {
            frames: Mutex::new(Some(frames)),
            opens: Arc::clone(&opens),
        };
        (backend, opens)
    }
}

impl CameraBackend for ReplayBackend {
    fn open(&self) -> Result<Box<dyn CameraSource>, CameraError> {
        *self.opens.lock().unwrap() += 1;
        let frames = self.frames.lock().unwrap().take().unwrap_or_default();
        Ok(Box::new(ReplayCamera(frames.into())))
    }
}

fn run_until_done(scanner: &mut Scanner) -> (StepOutcome, usize) {
    let ticket = scanner.start().expect("scanner was idle");
    let mut previews = 0;
    loop {
        match scanner.step(ticket) {
            StepOutcome::Preview(_) => previews += 1,
            outcome => return (outcome, previews),
        }
    }
}

#[test]
fn test_scan_finds_url_after_empty_frames() {
    let (backend, opens) = ReplayBackend::new(vec![
        blank_frame(),
        blank_frame(),
        qr_frame("https://example.com"),
    ]);
    let mut scanner = Scanner::new(Box::new(backend), Box::new(QrDetector::new()));

    let (outcome, previews) = run_until_done(&mut scanner);

    assert!(matches!(outcome, StepOutcome::Found(ref text) if text == "https://example.com"));
    assert_eq!(previews, 2);
    assert_eq!(*opens.lock().unwrap(), 1);
    assert_eq!(scanner.state(), ScanState::Found);
    assert_eq!(scanner.last_result(), Some("https://example.com"));
    assert_eq!(scanner.link(), Ok("https://example.com"));
    assert!(!scanner.is_scanning());
    assert!(!scanner.is_camera_open());
}

#[test]
fn test_scan_reports_camera_loss() {
    let (backend, _) = ReplayBackend::new(vec![blank_frame()]);
    let mut scanner = Scanner::new(Box::new(backend), Box::new(QrDetector::new()));

    let (outcome, previews) = run_until_done(&mut scanner);

    assert!(matches!(outcome, StepOutcome::CameraError(CameraError::ReadFailed(_))));
    assert_eq!(previews, 1);
    assert_eq!(scanner.state(), ScanState::CameraError);
    assert_eq!(scanner.last_result(), None);
    assert!(scanner.controls().start_enabled);
    assert!(!scanner.controls().stop_enabled);
}

#[test]
fn test_result_replaced_by_next_run() {
    let (first, _) = ReplayBackend::new(vec![qr_frame("FIRST")]);
    let mut scanner = Scanner::new(Box::new(first), Box::new(QrDetector::new()));
    run_until_done(&mut scanner);
    assert_eq!(scanner.copy_text(), Ok("FIRST"));

    let (second, _) = ReplayBackend::new(vec![blank_frame(), qr_frame("SECOND")]);
    scanner.set_backend(Box::new(second));
    scanner.start();
    assert_eq!(scanner.last_result(), None);
    scanner.stop();

    let (outcome, _) = run_until_done(&mut scanner);
    assert!(matches!(outcome, StepOutcome::Found(ref text) if text == "SECOND"));
}
