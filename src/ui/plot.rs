use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use flusight_dashboard::color::generate_palette;
use flusight_dashboard::state::AppState;

use super::unavailable;

/// `(index, value)` points, skipping gaps.
fn indexed_points(values: impl Iterator<Item = Option<f64>>) -> Vec<[f64; 2]> {
    values
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| [i as f64, v]))
        .collect()
}

// ---------------------------------------------------------------------------
// Time chart (central panel, right)
// ---------------------------------------------------------------------------

/// Actual observations, earlier seasons and the forecasts issued at the
/// selected week.
pub fn time_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Weighted ILI");
    let Some(views) = &state.views else {
        return;
    };
    let data = match &views.time_chart {
        Ok(data) => data,
        Err(e) => return unavailable(ui, e),
    };

    let week = state.selection.week;
    let colors = generate_palette(data.models.len());

    Plot::new("time_chart")
        .legend(Legend::default())
        .x_axis_label("Week of season")
        .y_axis_label("wILI (%)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &data.history {
                let points = indexed_points(series.actual.iter().map(|p| p.data));
                plot_ui.line(Line::new(points).name(&series.id).color(Color32::from_gray(110)).width(1.0));
            }

            if let Some(baseline) = data.baseline {
                let end = data.time_points.len().saturating_sub(1) as f64;
                let points: PlotPoints = [[0.0, baseline], [end, baseline]].into_iter().collect();
                plot_ui.line(Line::new(points).name("Baseline").color(Color32::DARK_GRAY).width(1.0));
            }

            let actual = indexed_points(data.actual.iter().copied());
            plot_ui.line(Line::new(actual).name("Actual").color(Color32::LIGHT_BLUE).width(2.5));

            for (model, color) in data.models.iter().zip(colors) {
                let Some(prediction) = model.prediction_at(week) else {
                    continue;
                };
                // Forecast lines start from the last observation they saw.
                let anchor = data.actual.get(week).copied().flatten().map(|v| [week as f64, v]);
                let points: PlotPoints = anchor
                    .into_iter()
                    .chain(
                        prediction
                            .series
                            .iter()
                            .enumerate()
                            .map(|(k, p)| [(week + k + 1) as f64, p.point]),
                    )
                    .collect();
                plot_ui.line(Line::new(points).name(&model.id).color(color).width(1.5));
            }

            plot_ui.vline(VLine::new(week as f64).color(Color32::YELLOW).width(1.0));
        });
}

// ---------------------------------------------------------------------------
// Distribution chart (bottom panel, right)
// ---------------------------------------------------------------------------

/// Probability curves of every model at the selected week for one target.
pub fn distribution_chart(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Forecast distributions");
    let Some(views) = &state.views else {
        return;
    };
    let data = match &views.distribution {
        Ok(data) => data,
        Err(e) => return unavailable(ui, e),
    };

    let targets = &state.config.scores.targets;
    let mut target_idx = state.dist_target.min(targets.len().saturating_sub(1));
    ui.horizontal(|ui: &mut Ui| {
        for (i, target) in targets.iter().enumerate() {
            ui.selectable_value(&mut target_idx, i, target.as_str());
        }
    });
    let Some(target) = targets.get(target_idx) else {
        return;
    };

    let colors = generate_palette(data.models.len());
    Plot::new("distribution_chart")
        .legend(Legend::default())
        .x_axis_label("wILI (%)")
        .y_axis_label("Probability")
        .show(ui, |plot_ui| {
            for (model, color) in data.models.iter().zip(colors) {
                let Some(curve) = model.curves.iter().find(|c| &c.target == target) else {
                    continue;
                };
                let points: PlotPoints = curve.data.iter().copied().collect();
                plot_ui.line(Line::new(points).name(&model.id).color(color).width(1.5));
            }
        });

    if target_idx != state.dist_target {
        state.dist_target = target_idx;
        ui.ctx().request_repaint();
    }
}
