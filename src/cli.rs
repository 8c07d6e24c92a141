// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! - Decoding QR codes from an image file
//! - Scanning from a camera without the GUI

use qrscanner::app::frame_processor::{Detector, QrDetector};
use qrscanner::app::scanner_from_config;
use qrscanner::backends::camera::CameraFrame;
use qrscanner::config::Config;
use qrscanner::scanner::StepOutcome;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Decode every QR code found in an image file
pub fn decode_image(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    let frame = CameraFrame::from_rgba(width, height, image.into_raw());

    let detections = QrDetector::new().detect(&frame);
    if detections.is_empty() {
        return Err(format!("No QR code found in {}", path.display()).into());
    }

    for detection in &detections {
        println!("{}", detection.content);
    }

    Ok(())
}

/// Scan from a camera until a code is decoded or Ctrl+C is pressed
pub fn scan_headless(device: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    gstreamer::init()?;

    let config = Config {
        camera_device: device,
        ..Config::default()
    };
    let mut scanner = scanner_from_config(&config);

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, Ordering::SeqCst);
    })?;

    let Some(ticket) = scanner.start() else {
        return Err("Scanner is already running".into());
    };
    eprintln!("Scanning... (press Ctrl+C to stop)");

    loop {
        if stop_flag.load(Ordering::SeqCst) {
            scanner.stop();
            eprintln!("Stopped after {} frames", scanner.frames_scanned());
            return Ok(());
        }

        match scanner.step(ticket) {
            StepOutcome::Preview(_) => std::thread::sleep(config.scan_interval()),
            StepOutcome::Found(text) => {
                println!("{}", text);
                return Ok(());
            }
            StepOutcome::CameraError(err) => return Err(err.into()),
            StepOutcome::Stale => return Ok(()),
        }
    }
}
