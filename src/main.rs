// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use qrscanner::app::AppModel;
use qrscanner::constants::ui;
use qrscanner::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "qrscanner")]
#[command(about = "QR code scanner for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode QR codes in an image file
    Decode {
        /// Image file to decode
        image: PathBuf,
    },

    /// Scan from a camera until a QR code is found
    Scan {
        /// Camera device (/dev/videoN or a PipeWire node); default camera if omitted
        #[arg(short, long)]
        device: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=qrscanner=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Decode { image }) => cli::decode_image(&image),
        Some(Commands::Scan { device }) => cli::scan_headless(device),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let (width, height) = ui::WINDOW_SIZE;
    let (min_width, min_height) = ui::MIN_WINDOW_SIZE;
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(width, height))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(min_width)
                .min_height(min_height),
        );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
