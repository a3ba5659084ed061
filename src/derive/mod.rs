//! Selection derivation layer.
//!
//! Everything here is a pure function of the loaded [`Dataset`], the current
//! [`Selection`] and reference data. Nothing is cached or mutated; the host
//! re-runs the derivations whenever the selection or dataset changes.

pub mod charts;
pub mod choropleth;
pub mod history;
pub mod scores;

use crate::data::model::{
    Dataset, DistData, DistKey, Metadata, RegionMeta, RegionSeries, ScoreCatalog, ScoreMeta,
};
use crate::data::population::PopulationTable;
use crate::error::{DeriveError, DeriveResult, nth};
use crate::selection::Selection;

pub use charts::{DistributionChartData, ModelDistribution, TimeChartData, TimePoint};
pub use choropleth::{ChoroplethData, ChoroplethRegion, ScaleKind, ValueRange, choropleth_range};
pub use history::{HistoryPoint, HistorySeries, trim_history};
pub use scores::{ScoreCell, ScoreRow, ScoreTable, score_comparison};

/// Choropleth modes, indexed by [`Selection::choropleth_index`].
pub const CHOROPLETHS: [&str; 2] = ["Actual Weighted ILI (%)", "Relative Weighted ILI (%)"];

/// Everything a derivation may read.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub dataset: &'a Dataset,
    pub selection: &'a Selection,
    pub catalog: &'a ScoreCatalog,
    pub population: &'a PopulationTable,
}

/// Region of the selected season at the selected region index.
///
/// Fails when metadata is missing, when the selected season has not been
/// downloaded, or when either index is past the end of its list.
pub fn resolve_selected_region<'a>(
    dataset: &'a Dataset,
    selection: &Selection,
) -> DeriveResult<&'a RegionSeries> {
    let metadata = dataset.metadata.as_ref().ok_or(DeriveError::MetadataMissing)?;
    let season_id = nth(&metadata.season_ids, selection.season, "season")?;
    let season = dataset.season(season_id).ok_or_else(|| DeriveError::NotLoaded {
        kind: "season",
        id: season_id.clone(),
    })?;
    nth(&season.regions, selection.region, "region")
}

impl<'a> View<'a> {
    pub fn metadata(&self) -> DeriveResult<&'a Metadata> {
        self.dataset.metadata.as_ref().ok_or(DeriveError::MetadataMissing)
    }

    /// Seasons offered by the selector. Empty until metadata is loaded.
    pub fn seasons(&self) -> &'a [String] {
        self.dataset
            .metadata
            .as_ref()
            .map(|m| m.season_ids.as_slice())
            .unwrap_or_default()
    }

    /// Region names offered by the selector. Empty until metadata is loaded.
    pub fn regions(&self) -> Vec<&'a str> {
        self.dataset
            .metadata
            .iter()
            .flat_map(|m| m.region_data.iter().map(|r| r.sub_id.as_str()))
            .collect()
    }

    pub fn update_time(&self) -> &'a str {
        self.dataset
            .metadata
            .as_ref()
            .map_or("NA", |m| m.update_time.as_str())
    }

    pub fn choropleths(&self) -> &'static [&'static str] {
        &CHOROPLETHS
    }

    pub fn selected_season_id(&self) -> DeriveResult<&'a str> {
        nth(&self.metadata()?.season_ids, self.selection.season, "season").map(String::as_str)
    }

    pub fn selected_region_meta(&self) -> DeriveResult<&'a RegionMeta> {
        nth(&self.metadata()?.region_data, self.selection.region, "region")
    }

    pub fn selected_region_id(&self) -> DeriveResult<&'a str> {
        self.selected_region_meta().map(|r| r.id.as_str())
    }

    pub fn selected_scores_meta(&self) -> DeriveResult<&'a ScoreMeta> {
        nth(&self.catalog.metas, self.selection.score, "score")
    }

    pub fn selected_data(&self) -> DeriveResult<&'a RegionSeries> {
        resolve_selected_region(self.dataset, self.selection)
    }

    /// Distribution record for the selected season and region.
    pub fn selected_dist_data(&self) -> DeriveResult<&'a DistData> {
        let key = DistKey::new(self.selected_season_id()?, self.selected_region_id()?);
        self.dataset.dist(&key).ok_or_else(|| DeriveError::NotLoaded {
            kind: "distribution",
            id: key.to_string(),
        })
    }

    /// Models forecasting the selected region, in season-file order.
    pub fn model_ids(&self) -> DeriveResult<Vec<&'a str>> {
        Ok(self
            .selected_data()?
            .models
            .iter()
            .map(|m| m.id.as_str())
            .collect())
    }
}
