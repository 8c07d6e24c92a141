// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer capture pipeline
//!
//! Frames are converted to RGBA inside the pipeline and pulled
//! synchronously from an appsink, one per scan step.

use super::types::{CameraFrame, FrameData};
use super::{CameraBackend, CameraSource};
use crate::constants::timing;
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Opens [`GstCamera`]s for a fixed device selection
#[derive(Debug, Clone)]
pub struct GstCameraBackend {
    device: Option<String>,
    frame_timeout: Duration,
}

impl GstCameraBackend {
    /// `device` of `None` selects the system default camera
    pub fn new(device: Option<String>, frame_timeout: Duration) -> Self {
        Self {
            device,
            frame_timeout,
        }
    }
}

impl CameraBackend for GstCameraBackend {
    fn open(&self) -> Result<Box<dyn CameraSource>, CameraError> {
        let camera = GstCamera::open(self.device.as_deref(), self.frame_timeout)?;
        Ok(Box::new(camera))
    }
}

/// A running capture pipeline
///
/// The device is held while the pipeline is in PLAYING. Dropping the
/// camera returns the pipeline to NULL, which releases the device.
pub struct GstCamera {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
    frame_timeout: Duration,
    frame_count: u64,
}

impl GstCamera {
    pub fn open(device: Option<&str>, frame_timeout: Duration) -> Result<Self, CameraError> {
        gstreamer::init()?;

        let pipeline_str = build_pipeline_string(device);
        info!(pipeline = %pipeline_str, "Creating capture pipeline");

        let pipeline = gstreamer::parse::launch(&pipeline_str)?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| {
                CameraError::InitializationFailed("Failed to downcast to Pipeline".into())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::InitializationFailed("Failed to find appsink".into()))?
            .downcast::<AppSink>()
            .map_err(|_| {
                CameraError::InitializationFailed("Failed to downcast to AppSink".into())
            })?;

        if let Err(e) = pipeline.set_state(gstreamer::State::Playing) {
            error!(error = %e, "Failed to set pipeline to PLAYING");
            check_bus_for_errors(&pipeline);
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(e.into());
        }

        info!(?device, "Camera opened");
        Ok(Self {
            pipeline,
            appsink,
            frame_timeout,
            frame_count: 0,
        })
    }
}

impl CameraSource for GstCamera {
    fn read_frame(&mut self) -> Result<CameraFrame, CameraError> {
        let timeout = gstreamer::ClockTime::from_mseconds(self.frame_timeout.as_millis() as u64);

        let Some(sample) = self.appsink.try_pull_sample(timeout) else {
            check_bus_for_errors(&self.pipeline);
            return Err(CameraError::ReadFailed(format!(
                "no frame within {}ms",
                self.frame_timeout.as_millis()
            )));
        };

        let frame = frame_from_sample(&sample)?;

        self.frame_count += 1;
        if self.frame_count % timing::FRAME_LOG_INTERVAL == 0 {
            debug!(
                frame = self.frame_count,
                width = frame.width,
                height = frame.height,
                "Pulled frame from pipeline"
            );
        }

        Ok(frame)
    }
}

impl Drop for GstCamera {
    fn drop(&mut self) {
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            warn!(error = %e, "Failed to stop capture pipeline");
        }
        // Wait for NULL so the device is free before another open
        let _ = self
            .pipeline
            .state(gstreamer::ClockTime::from_seconds(timing::STOP_TIMEOUT_SECS));
        info!(frames = self.frame_count, "Camera released");
    }
}

/// Source element for the selected device
///
/// - `None`: let GStreamer pick the default camera
/// - `/dev/videoN`: V4L2 device
/// - `pipewire-serial-N` / `pipewire-N`: PipeWire node
fn source_element(device: Option<&str>) -> String {
    match device {
        None => "autovideosrc".to_string(),
        Some(path) if path.starts_with("/dev/video") => {
            format!("v4l2src device={}", path)
        }
        Some(path) => {
            let target = path
                .strip_prefix("pipewire-serial-")
                .or_else(|| path.strip_prefix("pipewire-"))
                .unwrap_or(path);
            format!("pipewiresrc target-object={}", target)
        }
    }
}

fn build_pipeline_string(device: Option<&str>) -> String {
    format!(
        "{} ! decodebin ! videoconvert ! video/x-raw,format=RGBA ! \
         appsink name=sink max-buffers=1 drop=true sync=false",
        source_element(device)
    )
}

/// Extract an RGBA frame from a GStreamer sample
fn frame_from_sample(sample: &gstreamer::Sample) -> Result<CameraFrame, CameraError> {
    let caps = sample
        .caps()
        .ok_or_else(|| CameraError::InvalidFrame("No caps on sample".into()))?;
    let video_info = VideoInfo::from_caps(caps)
        .map_err(|e| CameraError::InvalidFrame(format!("Failed to get video info: {}", e)))?;

    let buffer = sample
        .buffer_owned()
        .ok_or_else(|| CameraError::InvalidFrame("No buffer in sample".into()))?;
    let map = buffer
        .into_mapped_buffer_readable()
        .map_err(|_| CameraError::InvalidFrame("Failed to map buffer".into()))?;

    Ok(CameraFrame {
        width: video_info.width(),
        height: video_info.height(),
        stride: video_info.stride()[0] as u32,
        data: FrameData::from_mapped_buffer(map),
        captured_at: Instant::now(),
    })
}

/// Log the first error or warning waiting on the pipeline bus
fn check_bus_for_errors(pipeline: &gstreamer::Pipeline) {
    if let Some(bus) = pipeline.bus()
        && let Some(msg) = bus.timed_pop_filtered(
            gstreamer::ClockTime::from_mseconds(100),
            &[
                gstreamer::MessageType::Error,
                gstreamer::MessageType::Warning,
            ],
        )
    {
        match msg.view() {
            gstreamer::MessageView::Error(err) => {
                error!(
                    error = %err.error(),
                    debug = ?err.debug(),
                    source = ?err.src().map(|s| s.name()),
                    "GStreamer error"
                );
            }
            gstreamer::MessageView::Warning(warn_msg) => {
                warn!(
                    warning = %warn_msg.error(),
                    debug = ?warn_msg.debug(),
                    "GStreamer warning"
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device_uses_autovideosrc() {
        assert_eq!(source_element(None), "autovideosrc");
    }

    #[test]
    fn test_v4l2_device() {
        assert_eq!(
            source_element(Some("/dev/video2")),
            "v4l2src device=/dev/video2"
        );
    }

    #[test]
    fn test_pipewire_targets() {
        assert_eq!(
            source_element(Some("pipewire-serial-57")),
            "pipewiresrc target-object=57"
        );
        assert_eq!(
            source_element(Some("pipewire-41")),
            "pipewiresrc target-object=41"
        );
    }

    #[test]
    fn test_pipeline_ends_in_rgba_appsink() {
        let pipeline = build_pipeline_string(None);
        assert!(pipeline.starts_with("autovideosrc ! "));
        assert!(pipeline.contains("video/x-raw,format=RGBA"));
        assert!(pipeline.contains("appsink name=sink"));
    }
}
