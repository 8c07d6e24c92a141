// SPDX-License-Identifier: GPL-3.0-only

//! Core types for frame processing results

/// A rectangular region within a frame
///
/// Coordinates are normalized (0.0 to 1.0) relative to the frame dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRegion {
    /// Left edge (0.0 = left of frame, 1.0 = right of frame)
    pub x: f32,
    /// Top edge (0.0 = top of frame, 1.0 = bottom of frame)
    pub y: f32,
    /// Width as fraction of frame width
    pub width: f32,
    /// Height as fraction of frame height
    pub height: f32,
}

impl FrameRegion {
    /// Create a frame region from pixel coordinates
    pub fn from_pixels(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            x: x as f32 / frame_width as f32,
            y: y as f32 / frame_height as f32,
            width: width as f32 / frame_width as f32,
            height: height as f32 / frame_height as f32,
        }
    }
}

/// A decoded QR code
#[derive(Debug, Clone, PartialEq)]
pub struct QrDetection {
    /// Where the code sits in the frame
    pub region: FrameRegion,
    /// Decoded payload, passed on verbatim
    pub content: String,
}

impl QrDetection {
    pub fn new(region: FrameRegion, content: String) -> Self {
        Self { region, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_is_normalized() {
        let region = FrameRegion::from_pixels(160, 120, 320, 240, 640, 480);
        assert_eq!(region.x, 0.25);
        assert_eq!(region.y, 0.25);
        assert_eq!(region.width, 0.5);
        assert_eq!(region.height, 0.5);
    }
}
