// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers
//! are implemented in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::scan`: Start/Stop and the timer-driven scan step
//! - `handlers::actions`: Copy Data and Open Link
//! - `handlers::system`: Navigation, configuration and settings

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Scanning =====
            Message::StartScanning => self.handle_start_scanning(),
            Message::StopScanning => self.handle_stop_scanning(),
            Message::ScanStep(ticket) => self.handle_scan_step(ticket),

            // ===== Result Actions =====
            Message::CopyData => self.handle_copy_data(),
            Message::OpenLink => self.handle_open_link(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
            Message::SelectScanInterval(index) => self.handle_select_scan_interval(index),
            Message::CameraDeviceInput(value) => self.handle_camera_device_input(value),
            Message::ApplyCameraDevice => self.handle_apply_camera_device(),

            Message::Noop => Task::none(),
        }
    }
}
