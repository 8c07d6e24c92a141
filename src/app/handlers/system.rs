// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles navigation, configuration updates and settings changes.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::{AppTheme, Config};
use crate::constants::timing;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    // =========================================================================
    // Navigation Handlers
    // =========================================================================

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let theme_changed = config.app_theme != self.config.app_theme;

        self.device_input = config.camera_device.clone().unwrap_or_default();
        self.config = config;
        self.apply_scanner_settings();

        if theme_changed {
            cosmic::command::set_theme(self.config.app_theme.theme())
        } else {
            Task::none()
        }
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&app_theme) = AppTheme::ALL.get(index) else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config();

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_select_scan_interval(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        if let Some(&interval_ms) = timing::SCAN_INTERVAL_PRESETS_MS.get(index) {
            info!(interval_ms, "Selected scan interval");
            self.config.scan_interval_ms = interval_ms;
            self.save_config();
        }
        Task::none()
    }

    pub(crate) fn handle_camera_device_input(
        &mut self,
        value: String,
    ) -> Task<cosmic::Action<Message>> {
        self.device_input = value;
        Task::none()
    }

    pub(crate) fn handle_apply_camera_device(&mut self) -> Task<cosmic::Action<Message>> {
        let device = self.device_input.trim();
        let device = (!device.is_empty()).then(|| device.to_string());

        if device != self.config.camera_device {
            info!(?device, "Camera device changed, used from the next scan");
            self.config.camera_device = device;
            self.apply_scanner_settings();
            self.save_config();
        }
        Task::none()
    }

    fn save_config(&self) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save settings");
        }
    }
}
