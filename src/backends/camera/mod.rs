// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │  Scanner (step())   │
//! └──────────┬──────────┘
//!            │ open() once per scan
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackend trait │  ← Knows which device to open
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraSource trait  │  ← Owns the device, one frame per read
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌──────────────┐
//!     │  GStreamer   │  ← autovideosrc / v4l2src / pipewiresrc
//!     └──────────────┘
//! ```
//!
//! A source holds the device for as long as it lives. Dropping it
//! releases the device.

pub mod pipeline;
pub mod types;

pub use pipeline::{GstCamera, GstCameraBackend};
pub use types::*;

use crate::errors::CameraError;

/// An open capture device
pub trait CameraSource: Send {
    /// Read a single frame, blocking for at most the source's frame timeout
    fn read_frame(&mut self) -> Result<CameraFrame, CameraError>;
}

/// Opens capture devices on demand
pub trait CameraBackend: Send {
    /// Open the configured device
    fn open(&self) -> Result<Box<dyn CameraSource>, CameraError>;
}
