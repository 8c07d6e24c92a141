// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Scan loop timing
pub mod timing {
    /// Delay before the next scan step is run (matches a ~100Hz UI timer)
    pub const SCAN_INTERVAL_MS: u64 = 10;

    /// Upper bound for a single frame read, including camera warm-up
    pub const FRAME_TIMEOUT_MS: u64 = 2_000;

    /// Pipeline state change timeout on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Scan interval choices offered in settings
    pub const SCAN_INTERVAL_PRESETS_MS: [u64; 4] = [10, 50, 100, 250];
}

/// QR detection tuning
pub mod detection {
    /// Frames larger than this (in either dimension) are downscaled before detection
    pub const MAX_DIMENSION: u32 = 640;

    /// Smallest frame dimension accepted for downscaling
    pub const MIN_DIMENSION: u32 = 64;
}

/// Window and layout values
pub mod ui {
    /// Initial window size (width, height)
    pub const WINDOW_SIZE: (f32, f32) = (600.0, 600.0);

    /// Minimum window size (width, height)
    pub const MIN_WINDOW_SIZE: (f32, f32) = (360.0, 360.0);

    /// Height of the live preview area
    pub const PREVIEW_HEIGHT: f32 = 360.0;

    /// Font size for the decoded result label
    pub const RESULT_TEXT_SIZE: u16 = 14;
}

/// Application information
pub mod app_info {
    use std::path::Path;

    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_a_preset() {
        assert!(timing::SCAN_INTERVAL_PRESETS_MS.contains(&timing::SCAN_INTERVAL_MS));
    }

    #[test]
    fn test_detection_bounds() {
        assert!(detection::MIN_DIMENSION < detection::MAX_DIMENSION);
    }
}
