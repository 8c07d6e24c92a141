// SPDX-License-Identifier: GPL-3.0-only

//! Result action handlers
//!
//! Copy Data and Open Link act on the last decoded text. Both warn
//! instead of acting when nothing has been decoded yet.

use crate::app::notification::{self, Level};
use crate::app::state::{AppModel, Message};
use crate::errors::ActionError;
use crate::fl;
use crate::integrations::{self, SystemBrowser};
use cosmic::Task;
use tracing::{info, warn};

impl AppModel {
    pub(crate) fn handle_copy_data(&self) -> Task<cosmic::Action<Message>> {
        let text = match self.scanner.copy_text() {
            Ok(text) => text.to_string(),
            Err(err) => {
                warn!(error = %err, "Nothing to copy");
                return notification::show(Level::Warning, fl!("no-data-title"), fl!("no-data-copy"));
            }
        };

        info!(
            text_length = text.len(),
            "Copying text from QR code to clipboard"
        );

        // Toolkit clipboard, also inside the Flatpak sandbox
        Task::batch([
            cosmic::iced::clipboard::write(text).map(|_: ()| cosmic::Action::App(Message::Noop)),
            notification::show(Level::Info, fl!("copied-title"), fl!("copied-body")),
        ])
    }

    pub(crate) fn handle_open_link(&self) -> Task<cosmic::Action<Message>> {
        match integrations::open_result(&self.scanner, &SystemBrowser) {
            Ok(()) => Task::none(),
            Err(ActionError::NoData) => {
                warn!("Nothing to open");
                notification::show(Level::Warning, fl!("no-data-title"), fl!("no-data-open"))
            }
            Err(ActionError::LaunchFailed(error)) => notification::show(
                Level::Error,
                fl!("error-title"),
                fl!("open-failed", error = error),
            ),
        }
    }
}
