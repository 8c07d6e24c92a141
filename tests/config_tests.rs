// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use qrscanner::Config;
use qrscanner::config::AppTheme;
use std::time::Duration;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(config.camera_device, None);
    assert_eq!(config.scan_interval(), Duration::from_millis(10));
    assert_eq!(config.frame_timeout(), Duration::from_secs(2));
}

#[test]
fn test_config_blank_device_uses_default_camera() {
    let config = Config {
        camera_device: Some("   ".to_string()),
        ..Config::default()
    };
    assert_eq!(config.device(), None);
}

#[test]
fn test_config_device_is_trimmed() {
    let config = Config {
        camera_device: Some(" /dev/video2\n".to_string()),
        ..Config::default()
    };
    assert_eq!(config.device(), Some("/dev/video2"));
}

#[test]
fn test_app_theme_index_round_trip() {
    for (i, theme) in AppTheme::ALL.iter().enumerate() {
        assert_eq!(theme.index(), i);
    }
}
