use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use flusight_dashboard::derive::ScoreCell;
use flusight_dashboard::state::AppState;

use super::unavailable;

fn cell_text(cell: &ScoreCell) -> RichText {
    let text = cell
        .value
        .map(|v| format!("{v:.3}"))
        .unwrap_or_else(|| "NA".to_string());
    if cell.best {
        RichText::new(text).strong().color(Color32::LIGHT_GREEN)
    } else {
        RichText::new(text)
    }
}

// ---------------------------------------------------------------------------
// Score table (bottom panel, left)
// ---------------------------------------------------------------------------

/// Per-model scores of the selected metric; the best cell per target is
/// highlighted.
pub fn score_table(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        return;
    };
    let table = match &views.scores {
        Ok(table) => table,
        Err(e) => {
            ui.heading("Scores");
            return unavailable(ui, e);
        }
    };
    ui.heading(format!("Scores – {}", table.metric));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(70.0), table.targets.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Model");
            });
            for target in &table.targets {
                header.col(|ui| {
                    ui.strong(target.as_str());
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(18.0, |mut tr| {
                    tr.col(|ui| {
                        ui.label(row.model.as_str());
                    });
                    for cell in &row.cells {
                        tr.col(|ui| {
                            ui.label(cell_text(cell));
                        });
                    }
                });
            }
        });
}
