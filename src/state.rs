use std::path::Path;

use anyhow::Result;

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::data::model::{DataFile, Dataset};
use crate::data::population::PopulationTable;
use crate::derive::{ChoroplethData, DistributionChartData, ScoreTable, TimeChartData, View};
use crate::error::DeriveResult;
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Every chart's data for the current selection. Each chart fails on its own
/// so, for example, missing scores do not blank the time chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub time_chart: DeriveResult<TimeChartData>,
    pub scores: DeriveResult<ScoreTable>,
    pub choropleth: DeriveResult<ChoroplethData>,
    pub distribution: DeriveResult<DistributionChartData>,
}

impl DashboardViews {
    pub fn derive(view: &View<'_>) -> Self {
        Self {
            time_chart: view.time_chart_data(),
            scores: view.selected_scores_data(),
            choropleth: view.choropleth_data(),
            distribution: view.distribution_chart_data(),
        }
    }

    fn log_failures(&self) {
        let failures = [
            ("time chart", self.time_chart.as_ref().err()),
            ("scores", self.scores.as_ref().err()),
            ("choropleth", self.choropleth.as_ref().err()),
            ("distribution", self.distribution.as_ref().err()),
        ];
        for (chart, err) in failures {
            match err {
                Some(err) if err.is_not_loaded() => log::debug!("{chart}: {err}"),
                Some(err) => log::warn!("{chart}: {err}"),
                None => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub dataset: Dataset,
    pub selection: Selection,
    pub config: DashboardConfig,
    pub population: PopulationTable,

    /// Views for the current selection (cached, rebuilt by [`Self::refresh`]).
    pub views: Option<DashboardViews>,

    /// Target shown in the distribution chart.
    pub dist_target: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let population = PopulationTable::bundled().unwrap_or_else(|e| {
            log::error!("{e:#}");
            PopulationTable::default()
        });
        Self {
            dataset: Dataset::default(),
            selection: Selection::default(),
            config: DashboardConfig::default(),
            population,
            views: None,
            dist_target: 0,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn view(&self) -> View<'_> {
        View {
            dataset: &self.dataset,
            selection: &self.selection,
            catalog: &self.config.scores,
            population: &self.population,
        }
    }

    /// Load config, population table and data files from a directory.
    pub fn open_data_dir(&mut self, dir: &Path) -> Result<()> {
        let config = DashboardConfig::load(dir)?;
        let population = config.population_table(dir)?;
        let dataset = loader::load_dir(dir)?;

        self.config = config;
        self.population = population;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Ingest a newly loaded dataset and select the last week of its latest
    /// season.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        let seasons = self.view().seasons().len();
        self.selection = Selection {
            season: seasons.saturating_sub(1),
            week: usize::MAX,
            ..Selection::default()
        };
        self.clamp_week();
        self.status_message = None;
        self.refresh();
    }

    /// Merge a single data file (e.g. a season downloaded later).
    pub fn add_file(&mut self, file: DataFile) {
        self.dataset.insert(file);
        self.refresh();
    }

    /// Re-derive every view from the current dataset and selection.
    pub fn refresh(&mut self) {
        let views = DashboardViews::derive(&self.view());
        views.log_failures();
        log::debug!("Derived views for {:?}", self.selection);
        self.views = Some(views);
    }

    pub fn select_season(&mut self, idx: usize) {
        self.selection.season = idx;
        self.clamp_week();
        self.refresh();
    }

    pub fn select_region(&mut self, idx: usize) {
        self.selection.region = idx;
        self.clamp_week();
        self.refresh();
    }

    pub fn select_score(&mut self, idx: usize) {
        self.selection.score = idx;
        self.refresh();
    }

    /// Select a week; clamped to the last observed week of the season.
    pub fn select_week(&mut self, idx: usize) {
        self.selection.week = idx;
        self.clamp_week();
        self.refresh();
    }

    pub fn set_choropleth_relative(&mut self, relative: bool) {
        self.selection.choropleth_relative = relative;
        self.refresh();
    }

    /// Number of weeks in the selected season, zero if not loaded.
    pub fn weeks_count(&self) -> usize {
        self.view().selected_data().map_or(0, |r| r.actual.len())
    }

    fn clamp_week(&mut self) {
        let weeks = self.weeks_count();
        self.selection.week = self.selection.week.min(weeks.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::fixtures;
    use crate::error::DeriveError;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(fixtures::dataset());
        state
    }

    #[test]
    fn new_dataset_selects_latest_season_and_week() {
        let state = loaded();
        assert_eq!(state.selection.season, 2);
        assert_eq!(state.selection.week, 2);
        let views = state.views.as_ref().unwrap();
        assert!(views.time_chart.is_ok());
        assert!(views.scores.is_ok());
        assert!(views.choropleth.is_ok());
        assert!(views.distribution.is_ok());
    }

    #[test]
    fn loaded_views_match_final_selection() {
        let state = loaded();
        let views = state.views.as_ref().unwrap();
        assert_eq!(*views, DashboardViews::derive(&state.view()));
        assert_eq!(views.distribution.as_ref().unwrap().current_idx, 2);
    }

    #[test]
    fn failed_open_keeps_previous_data() {
        let mut state = loaded();
        let dir = tempfile::tempdir().unwrap();
        assert!(state.open_data_dir(dir.path()).is_err());
        assert_eq!(state.dataset, fixtures::dataset());
        assert_eq!(state.selection.week, 2);
    }

    #[test]
    fn switching_to_undownloaded_season_reports_not_loaded() {
        let mut state = loaded();
        state.select_season(1);
        let views = state.views.as_ref().unwrap();
        assert!(matches!(
            views.time_chart,
            Err(DeriveError::NotLoaded { kind: "season", .. })
        ));
        assert_eq!(state.selection.week, 0);
    }

    #[test]
    fn week_is_clamped_to_season_length() {
        let mut state = loaded();
        state.select_week(40);
        assert_eq!(state.selection.week, 2);
        state.select_season(0);
        state.select_week(4);
        assert_eq!(state.selection.week, 4);
    }

    #[test]
    fn added_file_is_picked_up_on_refresh() {
        let mut state = loaded();
        state.select_region(1);
        assert!(state.views.as_ref().unwrap().distribution.is_err());

        let mut dist = state.dataset.dist_data[0].clone();
        dist.region_id = "ca".into();
        state.add_file(DataFile::Dist(dist));
        assert!(state.views.as_ref().unwrap().distribution.is_ok());
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut state = loaded();
        let before = state.views.clone();
        state.refresh();
        assert_eq!(state.views, before);
    }
}
