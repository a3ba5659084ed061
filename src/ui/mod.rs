pub mod map;
pub mod panels;
pub mod plot;
pub mod table;

use eframe::egui::{Color32, RichText, Ui};
use flusight_dashboard::error::DeriveError;

/// Placeholder shown in place of a chart that could not be derived.
pub fn unavailable(ui: &mut Ui, err: &DeriveError) {
    ui.centered_and_justified(|ui: &mut Ui| {
        if err.is_not_loaded() {
            ui.label(RichText::new(err.to_string()).italics());
        } else {
            ui.label(RichText::new(err.to_string()).color(Color32::RED));
        }
    });
}
