// SPDX-License-Identifier: GPL-3.0-only

//! Scan handlers
//!
//! Start/Stop buttons and the timer-driven scan step. Each step runs on
//! the UI thread and, when no code was found, schedules the next one
//! after the configured interval.

use crate::app::notification::{self, Level};
use crate::app::state::{AppModel, Message};
use crate::backends::camera::CameraFrame;
use crate::fl;
use crate::scanner::{ScanTicket, StepOutcome};
use cosmic::Task;
use cosmic::widget::image;
use tracing::{error, info, warn};

impl AppModel {
    pub(crate) fn handle_start_scanning(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(ticket) = self.scanner.start() else {
            return Task::none();
        };

        // First step runs right away, later ones on the timer
        self.handle_scan_step(ticket)
    }

    pub(crate) fn handle_stop_scanning(&mut self) -> Task<cosmic::Action<Message>> {
        self.scanner.stop();
        Task::none()
    }

    pub(crate) fn handle_scan_step(&mut self, ticket: ScanTicket) -> Task<cosmic::Action<Message>> {
        match self.scanner.step(ticket) {
            StepOutcome::Stale => Task::none(),
            StepOutcome::Preview(frame) => {
                if let Some(handle) = preview_handle(&frame) {
                    self.preview = Some(handle);
                }
                self.schedule_scan_step(ticket)
            }
            StepOutcome::Found(text) => {
                info!(
                    length = text.len(),
                    frames = self.scanner.frames_scanned(),
                    "Scan finished with result"
                );
                Task::none()
            }
            StepOutcome::CameraError(err) => {
                error!(error = %err, "Scan aborted");
                notification::show(
                    Level::Error,
                    fl!("error-title"),
                    fl!("camera-unavailable"),
                )
            }
        }
    }

    fn schedule_scan_step(&self, ticket: ScanTicket) -> Task<cosmic::Action<Message>> {
        let delay = self.config.scan_interval();
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
            },
            move |_| cosmic::Action::App(Message::ScanStep(ticket)),
        )
    }
}

/// Image handle for the live preview, or `None` for a truncated frame
fn preview_handle(frame: &CameraFrame) -> Option<image::Handle> {
    let pixels = frame.packed_rgba();
    if pixels.len() != frame.width as usize * frame.height as usize * 4 {
        warn!(
            width = frame.width,
            height = frame.height,
            bytes = pixels.len(),
            "Skipping truncated preview frame"
        );
        return None;
    }
    Some(image::Handle::from_rgba(frame.width, frame.height, pixels))
}
