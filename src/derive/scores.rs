use serde::Serialize;

use super::View;
use crate::data::model::{BestFunc, RegionScores};
use crate::error::{DeriveError, DeriveResult};

/// One cell of the score table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCell {
    pub value: Option<f64>,
    pub best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub model: String,
    /// One cell per target, in table-column order.
    pub cells: Vec<ScoreCell>,
}

/// Score table for the selected season, region and metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    pub metric: String,
    pub targets: Vec<String>,
    pub rows: Vec<ScoreRow>,
}

/// Compare models on `metric` for every target.
///
/// Returns `result[model][target]`. Per target, the best value according to
/// `best` is found among the models that have a value; the first model
/// holding exactly that value is flagged. Later ties stay unflagged, so each
/// target with at least one value has exactly one flagged cell.
pub fn score_comparison<M: AsRef<str>, T: AsRef<str>>(
    region_scores: &RegionScores,
    model_ids: &[M],
    targets: &[T],
    metric: &str,
    best: BestFunc,
) -> Vec<Vec<ScoreCell>> {
    let mut table: Vec<Vec<ScoreCell>> = model_ids
        .iter()
        .map(|mid| {
            let model = region_scores.model(mid.as_ref());
            targets
                .iter()
                .map(|target| ScoreCell {
                    value: model.and_then(|m| m.score(target.as_ref(), metric)),
                    best: false,
                })
                .collect()
        })
        .collect();

    for target_idx in 0..targets.len() {
        let column = || table.iter().map(move |row| row[target_idx].value);
        let Some(best_value) = best.pick(column().flatten()) else {
            continue;
        };
        let best_idx = column().position(|v| v == Some(best_value));
        if let Some(idx) = best_idx {
            table[idx][target_idx].best = true;
        }
    }

    table
}

impl View<'_> {
    /// Scores of the selected metric for every model of the selected region.
    pub fn selected_scores_data(&self) -> DeriveResult<ScoreTable> {
        let season_id = self.selected_season_id()?;
        let region_id = self.selected_region_id()?;
        let meta = self.selected_scores_meta()?;

        let not_loaded = || DeriveError::NotLoaded {
            kind: "scores",
            id: format!("{season_id}-{region_id}"),
        };
        let region_scores = self
            .dataset
            .scores(season_id)
            .ok_or_else(not_loaded)?
            .regions
            .iter()
            .find(|r| r.id == region_id)
            .ok_or_else(not_loaded)?;

        let model_ids = self.model_ids()?;
        let targets = &self.catalog.targets;
        let cells = score_comparison(region_scores, &model_ids, targets, &meta.id, meta.best);

        Ok(ScoreTable {
            metric: meta.name.clone(),
            targets: targets.clone(),
            rows: model_ids
                .into_iter()
                .zip(cells)
                .map(|(model, cells)| ScoreRow {
                    model: model.to_string(),
                    cells,
                })
                .collect(),
        })
    }
}
