// SPDX-License-Identifier: GPL-3.0-only

//! QR Scanner - scan QR codes from a camera on the COSMIC desktop
//!
//! # Architecture
//!
//! - [`app`]: Application shell, views and QR detection
//! - [`backends`]: Camera capture through GStreamer
//! - [`scanner`]: Scan loop controller and session state
//! - [`integrations`]: Handing decoded links to the system browser
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // qrscanner
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod integrations;
pub mod scanner;

// Re-export commonly used types
pub use app::frame_processor::{Detector, QrDetection, QrDetector};
pub use app::{AppModel, Message};
pub use backends::camera::{CameraBackend, CameraFrame, CameraSource};
pub use config::Config;
pub use errors::{ActionError, AppError, AppResult, CameraError};
pub use scanner::{ControlState, ScanState, ScanTicket, Scanner, StepOutcome};
