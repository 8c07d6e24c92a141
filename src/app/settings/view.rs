// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::{app_info, timing};
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::Length;
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let sections: Vec<Element<'_, Message>> = vec![
            self.build_appearance_section().into(),
            self.build_camera_section().into(),
            self.build_version_info(),
        ];

        let content: Element<'_, Message> = widget::settings::view_column(sections).into();

        context_drawer::context_drawer(content, Message::ToggleContextPage(ContextPage::Settings))
            .title(fl!("settings"))
    }

    fn build_appearance_section(&self) -> widget::settings::Section<'_, Message> {
        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(self.config.app_theme.index()),
            Message::SetAppTheme,
        );

        widget::settings::section()
            .title(fl!("appearance"))
            .add(widget::settings::item::builder(fl!("theme")).control(theme_dropdown))
    }

    fn build_camera_section(&self) -> widget::settings::Section<'_, Message> {
        let device_input = widget::text_input(fl!("camera-device-placeholder"), &self.device_input)
            .on_input(Message::CameraDeviceInput)
            .on_submit(|_| Message::ApplyCameraDevice)
            .width(Length::Fixed(180.0));

        let interval_index = timing::SCAN_INTERVAL_PRESETS_MS
            .iter()
            .position(|&ms| ms == self.config.scan_interval_ms);

        let interval_dropdown = widget::dropdown(
            &self.interval_dropdown_options,
            interval_index,
            Message::SelectScanInterval,
        );

        widget::settings::section()
            .title(fl!("camera"))
            .add(widget::settings::item::builder(fl!("camera-device")).control(device_input))
            .add(widget::settings::item::builder(fl!("scan-interval")).control(interval_dropdown))
    }

    fn build_version_info(&self) -> Element<'_, Message> {
        let version = if app_info::is_flatpak() {
            format!("{} (Flatpak)", app_info::version())
        } else {
            app_info::version().to_string()
        };

        widget::text(fl!("version", version = version))
            .size(12)
            .class(cosmic::theme::Text::Accent)
            .into()
    }
}
