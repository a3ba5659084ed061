use serde::Serialize;

use super::{HistorySeries, View};
use crate::data::model::{ModelSeries, TargetCurve};
use crate::error::{DeriveResult, nth};

/// Epiweek split into week-of-year and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    pub week: u32,
    pub year: u32,
}

impl From<u32> for TimePoint {
    fn from(epiweek: u32) -> Self {
        TimePoint {
            week: epiweek % 100,
            year: epiweek / 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeChartData {
    pub time_points: Vec<TimePoint>,
    pub actual: Vec<Option<f64>>,
    pub baseline: Option<f64>,
    pub models: Vec<ModelSeries>,
    pub history: Vec<HistorySeries>,
}

/// Curves of one model at the selected week. Empty when the model issued
/// nothing that week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDistribution {
    pub id: String,
    pub curves: Vec<TargetCurve>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionChartData {
    pub time_points: Vec<TimePoint>,
    pub current_idx: usize,
    pub models: Vec<ModelDistribution>,
}

impl View<'_> {
    pub fn time_points(&self) -> DeriveResult<Vec<TimePoint>> {
        Ok(self
            .selected_data()?
            .actual
            .iter()
            .map(|d| TimePoint::from(d.week))
            .collect())
    }

    pub fn actual(&self) -> DeriveResult<Vec<Option<f64>>> {
        Ok(self.selected_data()?.actual.iter().map(|d| d.actual).collect())
    }

    pub fn time_chart_data(&self) -> DeriveResult<TimeChartData> {
        let region = self.selected_data()?;
        Ok(TimeChartData {
            time_points: self.time_points()?,
            actual: self.actual()?,
            baseline: region.baseline,
            models: region.models.clone(),
            history: self.historical_data()?,
        })
    }

    pub fn distribution_chart_data(&self) -> DeriveResult<DistributionChartData> {
        let time_points = self.time_points()?;
        let current_idx = self.selection.week;
        nth(&time_points, current_idx, "week")?;

        let models = self
            .selected_dist_data()?
            .models
            .iter()
            .map(|m| ModelDistribution {
                id: m.id.clone(),
                curves: m
                    .curves
                    .get(current_idx)
                    .cloned()
                    .flatten()
                    .unwrap_or_default(),
            })
            .collect();

        Ok(DistributionChartData {
            time_points,
            current_idx,
            models,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ScoreCatalog;
    use crate::data::population::PopulationTable;
    use crate::derive::fixtures;
    use crate::error::DeriveError;
    use crate::selection::Selection;

    fn derived<R>(selection: Selection, f: impl FnOnce(&View<'_>) -> R) -> R {
        let dataset = fixtures::dataset();
        let catalog = ScoreCatalog::default();
        let population = PopulationTable::default();
        f(&View { dataset: &dataset, selection: &selection, catalog: &catalog, population: &population })
    }

    #[test]
    fn epiweeks_split_into_week_and_year() {
        assert_eq!(TimePoint::from(201852), TimePoint { week: 52, year: 2018 });
        assert_eq!(TimePoint::from(201901), TimePoint { week: 1, year: 2019 });
    }

    #[test]
    fn time_chart_for_selection() {
        let data = derived(Selection { season: 2, region: 2, ..Default::default() }, |v| {
            v.time_chart_data().unwrap()
        });
        assert_eq!(data.time_points[0], TimePoint { week: 40, year: 2018 });
        assert_eq!(data.actual, vec![Some(6.0), Some(12.0), Some(18.0)]);
        assert_eq!(data.baseline, Some(2.0));
        assert_eq!(data.models.len(), 2);
        assert_eq!(data.history.len(), 1);
    }

    #[test]
    fn time_chart_is_idempotent() {
        let selection = Selection { season: 2, region: 1, ..Default::default() };
        let first = derived(selection, |v| v.time_chart_data().unwrap());
        let second = derived(selection, |v| v.time_chart_data().unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn distribution_at_selected_week() {
        let data = derived(Selection { season: 2, week: 2, ..Default::default() }, |v| {
            v.distribution_chart_data().unwrap()
        });
        assert_eq!(data.current_idx, 2);
        assert_eq!(data.models[0].curves[0].data, vec![[1.0, 0.1], [2.0, 0.9]]);
        assert!(data.models[1].curves.is_empty());
    }

    #[test]
    fn distribution_gap_week_is_empty() {
        let data = derived(Selection { season: 2, week: 1, ..Default::default() }, |v| {
            v.distribution_chart_data().unwrap()
        });
        assert!(data.models.iter().all(|m| m.curves.is_empty()));
    }

    #[test]
    fn week_past_season_end() {
        let err = derived(Selection { season: 2, week: 3, ..Default::default() }, |v| {
            v.distribution_chart_data().unwrap_err()
        });
        assert_eq!(err, DeriveError::OutOfRange { kind: "week", index: 3, len: 3 });
    }
}
