// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Live preview on top, the decoded result below it, then the scan
//! controls and the result actions.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget::{self, icon};

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        widget::column()
            .push(self.build_preview())
            .push(self.build_result_label())
            .push(self.build_scan_controls())
            .push(self.build_result_actions())
            .spacing(spacing.space_s)
            .padding(spacing.space_m)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .into()
    }

    fn build_preview(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.preview {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::container(icon::from_name("camera-web-symbolic").size(64)).into(),
        };

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fixed(ui::PREVIEW_HEIGHT))
            .center(Length::Fill)
            .class(cosmic::theme::Container::Card)
            .into()
    }

    fn build_result_label(&self) -> Element<'_, Message> {
        let label = match self.scanner.last_result() {
            Some(text) => text.to_string(),
            None if self.scanner.is_scanning() => fl!("scanning"),
            None => fl!("no-result"),
        };

        widget::text(label).size(ui::RESULT_TEXT_SIZE).into()
    }

    fn build_scan_controls(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let controls = self.scanner.controls();

        let mut start_button = widget::button::suggested(fl!("start-scanning"));
        if controls.start_enabled {
            start_button = start_button.on_press(Message::StartScanning);
        }

        let mut stop_button = widget::button::standard(fl!("stop-scanning"));
        if controls.stop_enabled {
            stop_button = stop_button.on_press(Message::StopScanning);
        }

        widget::column()
            .push(start_button)
            .push(stop_button)
            .spacing(spacing.space_xs)
            .align_x(Alignment::Center)
            .into()
    }

    fn build_result_actions(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        // Always clickable; they warn when there is no result yet
        widget::row()
            .push(widget::button::standard(fl!("copy-data")).on_press(Message::CopyData))
            .push(widget::button::standard(fl!("open-link")).on_press(Message::OpenLink))
            .spacing(spacing.space_s)
            .into()
    }
}
