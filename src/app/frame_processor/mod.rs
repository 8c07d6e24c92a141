// SPDX-License-Identifier: GPL-3.0-only

//! Frame processor module
//!
//! Runs detection tasks on single camera frames. Currently implements
//! QR code detection.

pub mod tasks;
pub mod types;

pub use tasks::{Detector, QrDetector, qr_detector};
pub use types::{FrameRegion, QrDetection};
