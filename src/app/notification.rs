// SPDX-License-Identifier: GPL-3.0-only

//! Modal notifications
//!
//! Errors, warnings and confirmations are shown as native message dialogs.
//! The dialog future runs as a task so the event loop keeps painting
//! while it is open.

use crate::app::state::Message;
use cosmic::Task;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl From<Level> for MessageLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => MessageLevel::Info,
            Level::Warning => MessageLevel::Warning,
            Level::Error => MessageLevel::Error,
        }
    }
}

/// Show a message dialog with a single OK button
pub fn show(level: Level, title: String, body: String) -> Task<cosmic::Action<Message>> {
    debug!(?level, %title, "Showing notification");

    let dialog = AsyncMessageDialog::new()
        .set_level(level.into())
        .set_title(title)
        .set_description(body)
        .set_buttons(MessageButtons::Ok);

    Task::perform(dialog.show(), |_| cosmic::Action::App(Message::Noop))
}
