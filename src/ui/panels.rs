use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use flusight_dashboard::data::loader;
use flusight_dashboard::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Combo box over `options`; returns the newly picked index, if any.
fn selector(ui: &mut Ui, id: &str, label: &str, options: &[String], current: usize) -> Option<usize> {
    let mut picked = None;
    ui.strong(label);
    let selected_text = options.get(current).cloned().unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (i, option) in options.iter().enumerate() {
                if ui.selectable_label(i == current, option).clicked() {
                    picked = Some(i);
                }
            }
        });
    ui.add_space(6.0);
    picked
}

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(state.config.branding.title.as_str());
    ui.separator();

    if state.dataset.metadata.is_none() {
        ui.label("No data loaded.");
        return;
    }

    // Clone what we need so we can mutate state below.
    let view = state.view();
    let seasons: Vec<String> = view.seasons().to_vec();
    let regions: Vec<String> = view.regions().into_iter().map(str::to_string).collect();
    let downloaded: Vec<String> = state
        .dataset
        .downloaded_seasons()
        .into_iter()
        .map(str::to_string)
        .collect();
    let scores: Vec<String> = state.config.scores.metas.iter().map(|m| m.name.clone()).collect();
    let choropleths: Vec<String> = view.choropleths().iter().map(|c| c.to_string()).collect();
    let selection = state.selection;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let season_labels: Vec<String> = seasons
                .iter()
                .map(|s| {
                    if downloaded.contains(s) {
                        s.clone()
                    } else {
                        format!("{s} (not loaded)")
                    }
                })
                .collect();
            if let Some(i) = selector(ui, "season", "Season", &season_labels, selection.season) {
                state.select_season(i);
            }
            if let Some(i) = selector(ui, "region", "Region", &regions, selection.region) {
                state.select_region(i);
            }
            if let Some(i) = selector(ui, "score", "Score", &scores, selection.score) {
                state.select_score(i);
            }
            if let Some(i) = selector(ui, "choropleth", "Map", &choropleths, selection.choropleth_index()) {
                state.set_choropleth_relative(i == 1);
            }

            ui.separator();
            ui.strong("Week");
            let weeks = state.weeks_count();
            if weeks == 0 {
                ui.label("—");
                return;
            }
            let mut week = state.selection.week;
            let label = state
                .views
                .as_ref()
                .and_then(|v| v.time_chart.as_ref().ok())
                .and_then(|tc| tc.time_points.get(week))
                .map(|tp| format!("{}-W{:02}", tp.year, tp.week))
                .unwrap_or_default();
            if ui
                .add(egui::Slider::new(&mut week, 0..=weeks - 1).show_value(false).text(label))
                .changed()
            {
                state.select_week(week);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Add data file…").clicked() {
                add_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(tracker) = &state.config.branding.tracker {
            ui.hyperlink_to(state.config.branding.title.as_str(), tracker);
        } else {
            ui.strong(state.config.branding.title.as_str());
        }

        ui.separator();
        ui.label(format!("Updated: {}", state.view().update_time()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let Some(dir) = rfd::FileDialog::new()
        .set_title("Open forecast data folder")
        .pick_folder()
    else {
        return;
    };

    match state.open_data_dir(&dir) {
        Ok(()) => log::info!(
            "Opened {} ({} seasons downloaded)",
            dir.display(),
            state.dataset.season_data.len()
        ),
        Err(e) => {
            log::error!("Failed to open folder: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn add_file_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Add forecast data file")
        .add_filter("JSON", &["json"])
        .pick_file()
    else {
        return;
    };

    match loader::load_file(&path) {
        Ok(file) => {
            log::info!("Added {}", path.display());
            state.status_message = None;
            state.add_file(file);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
