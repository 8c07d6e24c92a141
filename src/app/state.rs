// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::config::Config;
use crate::scanner::{ScanTicket, Scanner};
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image;

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Scan loop controller owning the scan session
    pub scanner: Scanner,
    /// Last frame shown in the live preview
    pub preview: Option<image::Handle>,
    /// Camera device text field contents (applied on submit)
    pub device_input: String,
    /// Theme dropdown labels
    pub theme_dropdown_options: Vec<String>,
    /// Scan interval dropdown labels
    pub interval_dropdown_options: Vec<String>,
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open a URL from the about page
    LaunchUrl(String),
    /// Toggle a context drawer page
    ToggleContextPage(ContextPage),

    // ===== Scanning =====
    /// Start Scanning button
    StartScanning,
    /// Stop Scanning button
    StopScanning,
    /// Timer fired for the next scan step of a run
    ScanStep(ScanTicket),

    // ===== Result Actions =====
    /// Copy Data button
    CopyData,
    /// Open Link button
    OpenLink,

    // ===== Settings =====
    /// Configuration updated
    UpdateConfig(Config),
    /// Select app theme from dropdown
    SetAppTheme(usize),
    /// Select scan interval from dropdown
    SelectScanInterval(usize),
    /// Camera device field edited
    CameraDeviceInput(String),
    /// Camera device field submitted
    ApplyCameraDevice,

    /// No-op message for async tasks that don't need a response
    Noop,
}
