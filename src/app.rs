use eframe::egui;

use flusight_dashboard::state::AppState;

use crate::ui::{map, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FluSightApp {
    pub state: AppState,
}

impl eframe::App for FluSightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: scores and distributions ----
        egui::TopBottomPanel::bottom("detail_panel")
            .default_height(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.columns(2, |cols| {
                    table::score_table(&mut cols[0], &self.state);
                    plot::distribution_chart(&mut cols[1], &mut self.state);
                });
            });

        // ---- Central panel: map and time series ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                map::choropleth(&mut cols[0], &mut self.state);
                plot::time_chart(&mut cols[1], &self.state);
            });
        });
    }
}
