// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for the QR scanner
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ContextPage)
//! - `frame_processor`: QR detection on captured frames
//! - `handlers`: Message handlers grouped by functional domain
//! - `notification`: Modal dialogs for errors and confirmations
//! - `settings`: Settings drawer UI
//! - `view`: Main view rendering
//! - `update`: Message dispatch

pub mod frame_processor;
mod handlers;
mod notification;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::GstCameraBackend;
use crate::config::{AppTheme, Config};
use crate::constants::timing;
use crate::fl;
use crate::scanner::Scanner;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use frame_processor::QrDetector;
pub use state::{AppModel, ContextPage, Message};
use tracing::{error, info};

const REPOSITORY: &str = "https://github.com/cosmic-utils/qrscanner";
const APP_ICON: &[u8] = include_bytes!(
    "../../resources/icons/hicolor/scalable/apps/io.github.cosmic_utils.qrscanner.svg"
);

/// Build a scanner wired to the real camera and detector for `config`
pub fn scanner_from_config(config: &Config) -> Scanner {
    Scanner::new(
        Box::new(camera_backend(config)),
        Box::new(QrDetector::with_max_dimension(config.detection_max_dimension)),
    )
}

fn camera_backend(config: &Config) -> GstCameraBackend {
    GstCameraBackend::new(config.device().map(str::to_string), config.frame_timeout())
}

impl AppModel {
    /// Push the current configuration into the scanner
    ///
    /// Takes effect the next time a camera is opened.
    pub(crate) fn apply_scanner_settings(&mut self) {
        self.scanner.set_backend(Box::new(camera_backend(&self.config)));
        self.scanner.set_detector(Box::new(QrDetector::with_max_dimension(
            self.config.detection_max_dimension,
        )));
    }
}

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic_utils.qrscanner";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // GStreamer must be initialized before the first camera is opened
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let theme_dropdown_options = AppTheme::ALL
            .iter()
            .map(|theme| match theme {
                AppTheme::System => fl!("match-desktop"),
                AppTheme::Dark => fl!("dark"),
                AppTheme::Light => fl!("light"),
            })
            .collect();

        let interval_dropdown_options = timing::SCAN_INTERVAL_PRESETS_MS
            .iter()
            .map(|ms| format!("{} ms", ms))
            .collect();

        info!(
            device = ?config.device(),
            interval_ms = config.scan_interval_ms,
            "Starting QR scanner"
        );

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            scanner: scanner_from_config(&config),
            device_input: config.camera_device.clone().unwrap_or_default(),
            config,
            config_handler,
            preview: None,
            theme_dropdown_options,
            interval_dropdown_options,
        };

        let theme_task = cosmic::command::set_theme(app.config.app_theme.theme());

        (app, theme_task)
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    ///
    /// Scan steps are scheduled as tasks, so only config changes are watched here.
    fn subscription(&self) -> Subscription<Self::Message> {
        self.core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config))
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
