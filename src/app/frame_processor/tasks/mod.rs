// SPDX-License-Identifier: GPL-3.0-only

//! Frame processing tasks
//!
//! This module contains the detector abstraction and its implementations.

pub mod qr_detector;

pub use qr_detector::QrDetector;

use crate::app::frame_processor::types::QrDetection;
use crate::backends::camera::types::CameraFrame;

/// Finds and decodes codes in a single frame
///
/// Detection is treated as an opaque capability: an empty result means
/// "no code found".
pub trait Detector: Send {
    fn detect(&self, frame: &CameraFrame) -> Vec<QrDetection>;
}
