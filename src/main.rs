//! Minima Explorer - Interactive Global & Local Minima Viewer
//!
//! A Rust application for exploring the minima of classic functions.

use eframe::egui;
use minima_explorer::config::{AppConfig, CONFIG_FILE_NAME};
use minima_explorer::gui::MinimaApp;
use std::path::Path;
use tracing::info;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    info!(
        initial_exercise = config.initial_exercise,
        "Starting Minima Explorer"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Minima Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Minima Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(MinimaApp::new(cc, config)))),
    )
}
