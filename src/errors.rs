// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the scanner application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Camera could not be opened or read
    Camera(CameraError),
    /// A user action could not be carried out
    Action(ActionError),
    /// Image file could not be loaded (CLI decode)
    Image(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
///
/// Every variant ends the current scan attempt. The user restarts
/// scanning manually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// GStreamer or the capture pipeline could not be set up
    InitializationFailed(String),
    /// The pipeline started but no frame arrived in time
    ReadFailed(String),
    /// The sample did not contain a usable RGBA frame
    InvalidFrame(String),
}

/// Errors raised by the Copy/Open actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Copy/Open invoked before any code was decoded
    NoData,
    /// The system URL handler could not be launched
    LaunchFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Action(e) => write!(f, "{}", e),
            AppError::Image(msg) => write!(f, "Image error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::InitializationFailed(msg) => {
                write!(f, "Camera initialization failed: {}", msg)
            }
            CameraError::ReadFailed(msg) => write!(f, "Failed to read frame: {}", msg),
            CameraError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NoData => write!(f, "No QR code data available"),
            ActionError::LaunchFailed(msg) => write!(f, "Failed to open link: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for ActionError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<ActionError> for AppError {
    fn from(err: ActionError) -> Self {
        AppError::Action(err)
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Image(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<gstreamer::glib::Error> for CameraError {
    fn from(err: gstreamer::glib::Error) -> Self {
        CameraError::InitializationFailed(err.to_string())
    }
}

impl From<gstreamer::StateChangeError> for CameraError {
    fn from(err: gstreamer::StateChangeError) -> Self {
        CameraError::InitializationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_converts_to_app_error() {
        let err: AppError = CameraError::ReadFailed("timeout".into()).into();
        assert_eq!(err.to_string(), "Camera error: Failed to read frame: timeout");
    }

    #[test]
    fn test_no_data_message() {
        let err: AppError = ActionError::NoData.into();
        assert_eq!(err.to_string(), "No QR code data available");
    }
}
