use serde::Serialize;

use super::View;
use crate::error::DeriveResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub week: u32,
    pub data: Option<f64>,
}

/// Observations of an earlier season, aligned to the selected one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySeries {
    pub id: String,
    pub actual: Vec<HistoryPoint>,
}

/// The last `window` points of `series`, order preserved.
pub fn trim_history<T>(series: &[T], window: usize) -> &[T] {
    &series[series.len().saturating_sub(window)..]
}

impl View<'_> {
    /// Same region in every downloaded season older than the selected one,
    /// each trimmed to the selected season's number of weeks. Seasons that
    /// have not been downloaded are skipped.
    pub fn historical_data(&self) -> DeriveResult<Vec<HistorySeries>> {
        let weeks_count = self.selected_data()?.actual.len();
        let older = &self.seasons()[..self.selection.season];

        Ok(older
            .iter()
            .filter_map(|season_id| {
                let region = self.dataset.season(season_id)?.regions.get(self.selection.region)?;
                let points: Vec<HistoryPoint> = region
                    .actual
                    .iter()
                    .map(|d| HistoryPoint { week: d.week, data: d.actual })
                    .collect();
                Some(HistorySeries {
                    id: season_id.clone(),
                    actual: trim_history(&points, weeks_count).to_vec(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ScoreCatalog;
    use crate::data::population::PopulationTable;
    use crate::derive::fixtures;
    use crate::selection::Selection;

    #[test]
    fn keeps_the_tail() {
        assert_eq!(trim_history(&[1, 2, 3, 4, 5], 3), &[3, 4, 5]);
    }

    #[test]
    fn short_series_is_untouched() {
        assert_eq!(trim_history(&[1, 2], 5), &[1, 2]);
        assert_eq!(trim_history::<u8>(&[], 5), &[] as &[u8]);
        assert!(trim_history(&[1, 2], 0).is_empty());
    }

    #[test]
    fn history_skips_undownloaded_seasons_and_trims() {
        let dataset = fixtures::dataset();
        let catalog = ScoreCatalog::default();
        let population = PopulationTable::default();
        let selection = Selection { season: 2, region: 1, ..Default::default() };
        let view = View { dataset: &dataset, selection: &selection, catalog: &catalog, population: &population };

        let history = view.historical_data().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "2016-2017");
        // 2016-2017 has five weeks, selected season three: keep the last three
        let weeks: Vec<u32> = history[0].actual.iter().map(|p| p.week).collect();
        assert_eq!(weeks, vec![201642, 201643, 201644]);
        assert_eq!(history[0].actual[0].data, Some(6.0));
    }

    #[test]
    fn oldest_season_has_no_history() {
        let dataset = fixtures::dataset();
        let catalog = ScoreCatalog::default();
        let population = PopulationTable::default();
        let selection = Selection::default();
        let view = View { dataset: &dataset, selection: &selection, catalog: &catalog, population: &population };
        assert!(view.historical_data().unwrap().is_empty());
    }
}
