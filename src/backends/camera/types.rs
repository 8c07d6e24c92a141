// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use gstreamer::buffer::{MappedBuffer, Readable};
use std::sync::Arc;
use std::time::Instant;

/// Frame data storage - either pre-copied bytes or zero-copy GStreamer buffer
///
/// The `Mapped` variant keeps the GStreamer buffer mapped and alive until
/// all references are dropped.
#[derive(Clone)]
pub enum FrameData {
    /// Pre-copied bytes (image files, tests)
    Copied(Arc<[u8]>),
    /// Zero-copy mapped GStreamer buffer
    Mapped(Arc<MappedBuffer<Readable>>),
}

impl FrameData {
    /// Create FrameData from a mapped GStreamer buffer (zero-copy)
    pub fn from_mapped_buffer(buffer: MappedBuffer<Readable>) -> Self {
        FrameData::Mapped(Arc::new(buffer))
    }

    /// Get the length of the frame data in bytes
    pub fn len(&self) -> usize {
        match self {
            FrameData::Copied(data) => data.len(),
            FrameData::Mapped(buf) => buf.len(),
        }
    }

    /// Check if the frame data is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for FrameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameData::Copied(data) => write!(f, "FrameData::Copied({} bytes)", data.len()),
            FrameData::Mapped(buf) => write!(f, "FrameData::Mapped({} bytes)", buf.len()),
        }
    }
}

impl AsRef<[u8]> for FrameData {
    fn as_ref(&self) -> &[u8] {
        match self {
            FrameData::Copied(data) => data.as_ref(),
            FrameData::Mapped(buf) => buf.as_slice(),
        }
    }
}

impl std::ops::Deref for FrameData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_ref()
    }
}

impl From<Vec<u8>> for FrameData {
    fn from(data: Vec<u8>) -> Self {
        FrameData::Copied(Arc::from(data.into_boxed_slice()))
    }
}

/// A single RGBA frame from the camera
///
/// Transient: rendered or handed to the detector, then dropped.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, row by row
    pub data: FrameData,
    /// Bytes per row, may include padding
    pub stride: u32,
    /// When the frame was pulled from the device
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Build a frame from tightly packed RGBA pixels
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data: pixels.into(),
            stride: width * 4,
            captured_at: Instant::now(),
        }
    }

    /// Copy the RGBA pixels without stride padding
    ///
    /// Rows that are cut short by a truncated buffer are skipped, so the
    /// result may be shorter than `width * height * 4`.
    pub fn packed_rgba(&self) -> Vec<u8> {
        let width = self.width as usize;
        let height = self.height as usize;
        let stride = self.stride as usize;

        if stride == width * 4 && self.data.len() == width * height * 4 {
            return self.data.to_vec();
        }

        let mut result = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let row_start = y * stride;
            let row_end = row_start + width * 4;
            if row_end <= self.data.len() {
                result.extend_from_slice(&self.data[row_start..row_end]);
            }
        }

        result
    }

    /// Luma (BT.601) value of the pixel at `(x, y)`, or 0 outside the buffer
    pub fn luma_at(&self, x: u32, y: u32) -> u8 {
        let offset = y as usize * self.stride as usize + x as usize * 4;
        match self.data.get(offset..offset + 3) {
            Some(&[r, g, b]) => {
                ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_rgba_strips_stride_padding() {
        let data: Vec<u8> = vec![
            255, 0, 0, 255, // Red pixel
            0, 255, 0, 255, // Green pixel
            0, 0, // stride padding
            0, 0, 255, 255, // Blue pixel
            255, 255, 255, 255, // White pixel
            0, 0, // stride padding
        ];

        let frame = CameraFrame {
            width: 2,
            height: 2,
            data: data.into(),
            stride: 10,
            captured_at: Instant::now(),
        };

        let result = frame.packed_rgba();
        assert_eq!(result.len(), 16);
        assert_eq!(&result[0..4], &[255, 0, 0, 255]);
        assert_eq!(&result[4..8], &[0, 255, 0, 255]);
        assert_eq!(&result[8..12], &[0, 0, 255, 255]);
        assert_eq!(&result[12..16], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_packed_rgba_skips_truncated_rows() {
        let frame = CameraFrame {
            width: 2,
            height: 2,
            data: vec![7u8; 12].into(),
            stride: 8,
            captured_at: Instant::now(),
        };

        // Second row would need bytes 8..16 but only 12 exist
        assert_eq!(frame.packed_rgba().len(), 8);
    }

    #[test]
    fn test_luma() {
        let frame = CameraFrame::from_rgba(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 255]);
        assert_eq!(frame.luma_at(0, 0), 255);
        assert_eq!(frame.luma_at(1, 0), 0);
        assert_eq!(frame.luma_at(5, 5), 0);
    }
}
