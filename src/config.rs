// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{detection, timing};
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl AppTheme {
    /// Themes in settings dropdown order
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }

    /// Position in [`AppTheme::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Capture device ("/dev/video0", "pipewire-serial-42"); None uses the system default
    pub camera_device: Option<String>,
    /// Delay between scan steps in milliseconds
    pub scan_interval_ms: u64,
    /// Maximum time to wait for a single frame in milliseconds
    pub frame_timeout_ms: u64,
    /// Frames are downscaled to this size before QR detection
    pub detection_max_dimension: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            camera_device: None,
            scan_interval_ms: timing::SCAN_INTERVAL_MS,
            frame_timeout_ms: timing::FRAME_TIMEOUT_MS,
            detection_max_dimension: detection::MAX_DIMENSION,
        }
    }
}

impl Config {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }

    /// Configured device path, treating a blank entry as "system default"
    pub fn device(&self) -> Option<&str> {
        self.camera_device
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}
