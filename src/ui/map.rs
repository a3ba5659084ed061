use eframe::egui::{self, Color32, RichText, Ui};

use flusight_dashboard::color::ColorScale;
use flusight_dashboard::state::AppState;

use super::unavailable;

const CELL_SIZE: egui::Vec2 = egui::vec2(64.0, 40.0);

// ---------------------------------------------------------------------------
// Choropleth grid (central panel, left)
// ---------------------------------------------------------------------------

/// One coloured cell per region at the selected week. Clicking a cell
/// selects that region.
pub fn choropleth(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regions");
    let Some(views) = &state.views else {
        return;
    };
    let data = match &views.choropleth {
        Ok(data) => data,
        Err(e) => return unavailable(ui, e),
    };

    let week = state.selection.week;
    let scale = data.range.map(|range| ColorScale::new(data.kind, range));
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 40.0)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for (idx, region) in data.data.iter().enumerate() {
                    let value = data.scaled_value(region, week, &state.population);
                    let fill = scale.map_or(Color32::GRAY, |s| s.color_for(value));
                    let label = region.states.first().unwrap_or(&region.region);
                    let hover = match data.decorated_value(region, week) {
                        Some(text) => format!("{}: {text}", region.region),
                        None => format!("{}: no data", region.region),
                    };
                    let button = egui::Button::new(RichText::new(label.as_str()).color(Color32::BLACK))
                        .fill(fill)
                        .min_size(CELL_SIZE);
                    if ui.add(button).on_hover_text(hover).clicked() {
                        // +1: the national region is not on the map
                        clicked = Some(idx + 1);
                    }
                }
            });
        });

    if let Some(scale) = scale {
        ui.horizontal(|ui: &mut Ui| {
            for (label, color) in scale.legend_entries(5) {
                ui.label(RichText::new("■").color(color));
                ui.small(label);
            }
        });
    }

    if let Some(idx) = clicked {
        state.select_region(idx);
    }
}
