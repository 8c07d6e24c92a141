// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use qrscanner::constants::{detection, timing, ui};

#[test]
fn test_scan_interval_presets_sorted() {
    let presets = timing::SCAN_INTERVAL_PRESETS_MS;
    assert!(presets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_frame_timeout_exceeds_scan_interval() {
    assert!(timing::FRAME_TIMEOUT_MS > timing::SCAN_INTERVAL_MS);
}

#[test]
fn test_window_fits_minimum() {
    assert!(ui::WINDOW_SIZE.0 >= ui::MIN_WINDOW_SIZE.0);
    assert!(ui::WINDOW_SIZE.1 >= ui::MIN_WINDOW_SIZE.1);
    assert!(ui::PREVIEW_HEIGHT < ui::WINDOW_SIZE.1);
}

#[test]
fn test_detection_dimension_range() {
    assert!(detection::MIN_DIMENSION <= detection::MAX_DIMENSION);
}
