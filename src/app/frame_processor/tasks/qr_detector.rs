// SPDX-License-Identifier: GPL-3.0-only

//! QR code detection task
//!
//! This module implements QR code detection using the rqrr crate.
//! Camera frames are converted to grayscale, downscaled if needed and
//! searched for QR codes, returning their positions and decoded content.

use super::Detector;
use crate::app::frame_processor::types::{FrameRegion, QrDetection};
use crate::backends::camera::types::CameraFrame;
use crate::constants::detection;
use tracing::{debug, trace};

/// QR code detector
///
/// Optimized for real-time processing with frame downscaling.
pub struct QrDetector {
    /// Maximum dimension for processing (frames are downscaled to this)
    max_dimension: u32,
}

impl Default for QrDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDetector {
    /// Create a new QR detector with default settings
    pub fn new() -> Self {
        Self {
            max_dimension: detection::MAX_DIMENSION,
        }
    }

    /// Create a QR detector with custom max dimension
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(detection::MIN_DIMENSION),
        }
    }
}

impl Detector for QrDetector {
    fn detect(&self, frame: &CameraFrame) -> Vec<QrDetection> {
        detect_sync(frame, self.max_dimension)
    }
}

fn detect_sync(frame: &CameraFrame, max_dimension: u32) -> Vec<QrDetection> {
    let start = std::time::Instant::now();

    let width = frame.width;
    let height = frame.height;
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (luma, proc_width, proc_height, scale) = if width > max_dimension || height > max_dimension
    {
        let scale = (width as f32 / max_dimension as f32).max(height as f32 / max_dimension as f32);
        let new_width = ((width as f32 / scale) as u32).max(1);
        let new_height = ((height as f32 / scale) as u32).max(1);
        (
            downscale_luma(frame, new_width, new_height),
            new_width,
            new_height,
            scale,
        )
    } else {
        (luma_plane(frame), width, height, 1.0)
    };

    trace!(
        proc_width,
        proc_height,
        scale,
        conversion_ms = start.elapsed().as_millis(),
        "Prepared grayscale image for processing"
    );

    let row = proc_width as usize;
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(proc_width as usize, proc_height as usize, |x, y| {
            luma[y * row + x]
        });
    let grids = prepared.detect_grids();

    let mut detections = Vec::with_capacity(grids.len());
    for grid in grids {
        let content = match grid.decode() {
            Ok((_meta, content)) => content,
            Err(e) => {
                debug!(error = %e, "Failed to decode QR code");
                continue;
            }
        };

        // Axis-aligned box around the four grid corners
        let xs = grid
            .bounds
            .iter()
            .map(|p| p.x.clamp(0, proc_width as i32) as f32);
        let ys = grid
            .bounds
            .iter()
            .map(|p| p.y.clamp(0, proc_height as i32) as f32);
        let (min_x, max_x) = xs.fold((f32::MAX, 0.0f32), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let (min_y, max_y) = ys.fold((f32::MAX, 0.0f32), |(lo, hi), v| (lo.min(v), hi.max(v)));

        // Scale back to original frame coordinates
        let region = FrameRegion::from_pixels(
            (min_x * scale) as u32,
            (min_y * scale) as u32,
            ((max_x - min_x) * scale) as u32,
            ((max_y - min_y) * scale) as u32,
            width,
            height,
        );

        debug!(
            content_length = content.len(),
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "Detected QR code"
        );

        detections.push(QrDetection::new(region, content));
    }

    if !detections.is_empty() {
        debug!(
            count = detections.len(),
            total_ms = start.elapsed().as_millis(),
            "QR detection found codes"
        );
    }

    detections
}

/// Grayscale copy of the frame at full resolution
fn luma_plane(frame: &CameraFrame) -> Vec<u8> {
    let mut result = Vec::with_capacity((frame.width * frame.height) as usize);
    for y in 0..frame.height {
        for x in 0..frame.width {
            result.push(frame.luma_at(x, y));
        }
    }
    result
}

/// Downscale the frame to grayscale using bilinear interpolation
fn downscale_luma(frame: &CameraFrame, dst_width: u32, dst_height: u32) -> Vec<u8> {
    let src_width = frame.width;
    let src_height = frame.height;

    let mut result = Vec::with_capacity((dst_width * dst_height) as usize);

    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;

    for y in 0..dst_height {
        for x in 0..dst_width {
            let src_x = x as f32 * x_ratio;
            let src_y = y as f32 * y_ratio;

            let x0 = (src_x as u32).min(src_width - 1);
            let y0 = (src_y as u32).min(src_height - 1);
            let x1 = (x0 + 1).min(src_width - 1);
            let y1 = (y0 + 1).min(src_height - 1);

            let x_frac = src_x - x0 as f32;
            let y_frac = src_y - y0 as f32;

            let p00 = frame.luma_at(x0, y0) as f32;
            let p01 = frame.luma_at(x1, y0) as f32;
            let p10 = frame.luma_at(x0, y1) as f32;
            let p11 = frame.luma_at(x1, y1) as f32;

            let value = p00 * (1.0 - x_frac) * (1.0 - y_frac)
                + p01 * x_frac * (1.0 - y_frac)
                + p10 * (1.0 - x_frac) * y_frac
                + p11 * x_frac * y_frac;

            result.push(value as u8);
        }
    }

    result
}
