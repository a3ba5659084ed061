mod app;
mod ui;

use std::path::PathBuf;

use app::FluSightApp;
use eframe::egui;
use flusight_dashboard::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    if let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) {
        if let Err(e) = state.open_data_dir(&dir) {
            log::error!("Failed to open {}: {e:#}", dir.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FluSight – Forecast Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(FluSightApp { state }))),
    )
}
