// SPDX-License-Identifier: GPL-3.0-only

//! Desktop integrations used by the Open Link action
//!
//! Clipboard writes go through the toolkit (`cosmic::iced::clipboard`), so
//! only the browser launch needs an abstraction here.

use crate::errors::ActionError;
use crate::scanner::Scanner;
use tracing::{error, info};

/// Hands a URL to something that can display it
pub trait UrlLauncher {
    fn launch(&self, url: &str) -> Result<(), ActionError>;
}

/// The desktop's default URL handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlLauncher for SystemBrowser {
    fn launch(&self, url: &str) -> Result<(), ActionError> {
        open::that_detached(url).map_err(|e| {
            error!(url = %url, error = %e, "Failed to open URL");
            ActionError::LaunchFailed(e.to_string())
        })
    }
}

/// Open the last decoded text with `launcher`
///
/// The text is passed on exactly as decoded, without URL validation.
pub fn open_result(scanner: &Scanner, launcher: &dyn UrlLauncher) -> Result<(), ActionError> {
    let url = scanner.link()?;
    info!(url = %url, "Opening URL from QR code");
    launcher.launch(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::frame_processor::{Detector, FrameRegion, QrDetection};
    use crate::backends::camera::{CameraBackend, CameraFrame, CameraSource};
    use crate::errors::CameraError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLauncher(RefCell<Vec<String>>);

    impl UrlLauncher for RecordingLauncher {
        fn launch(&self, url: &str) -> Result<(), ActionError> {
            self.0.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct StillCamera;

    impl CameraSource for StillCamera {
        fn read_frame(&mut self) -> Result<CameraFrame, CameraError> {
            Ok(CameraFrame::from_rgba(1, 1, vec![0; 4]))
        }
    }

    struct StillBackend;

    impl CameraBackend for StillBackend {
        fn open(&self) -> Result<Box<dyn CameraSource>, CameraError> {
            Ok(Box::new(StillCamera))
        }
    }

    struct FixedDetector(&'static str);

    impl Detector for FixedDetector {
        fn detect(&self, _frame: &CameraFrame) -> Vec<QrDetection> {
            vec![QrDetection::new(
                FrameRegion::from_pixels(0, 0, 1, 1, 1, 1),
                self.0.to_string(),
            )]
        }
    }

    #[test]
    fn test_open_passes_exact_text() {
        let mut scanner = Scanner::new(
            Box::new(StillBackend),
            Box::new(FixedDetector("https://example.com")),
        );
        let ticket = scanner.start().unwrap();
        scanner.step(ticket);

        let launcher = RecordingLauncher::default();
        open_result(&scanner, &launcher).unwrap();
        assert_eq!(*launcher.0.borrow(), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_open_without_result_does_not_launch() {
        let scanner = Scanner::new(Box::new(StillBackend), Box::new(FixedDetector("x")));
        let launcher = RecordingLauncher::default();

        assert_eq!(open_result(&scanner, &launcher), Err(ActionError::NoData));
        assert!(launcher.0.borrow().is_empty());
    }
}
