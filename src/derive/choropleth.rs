use serde::Serialize;

use super::View;
use crate::data::population::PopulationTable;
use crate::error::{DeriveError, DeriveResult};

const PER_CAPITA: f64 = 100_000.0;

/// Values of one map region over the selected season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethRegion {
    pub region: String,
    pub states: Vec<String>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Absolute incidence.
    Sequential,
    /// Percent change from baseline, centred on zero.
    Diverging,
}

impl ScaleKind {
    /// Label shown next to a map value.
    pub fn decorate(self, value: f64) -> String {
        match self {
            ScaleKind::Sequential => format!("{value:.2} %"),
            ScaleKind::Diverging => format!("{value:.2} % (baseline)"),
        }
    }

    /// Label of a colour-scale tick. Sequential maps are coloured per 100,000
    /// population rather than by the raw reading.
    pub fn legend_label(self, value: f64) -> String {
        match self {
            ScaleKind::Sequential => format!("{value:.2} per 100k"),
            ScaleKind::Diverging => self.decorate(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn point(v: f64) -> Self {
        ValueRange { min: v, max: v }
    }

    fn merge(self, other: ValueRange) -> Self {
        ValueRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn as_array(self) -> [f64; 2] {
        [self.min, self.max]
    }

    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethData {
    /// Every region except the national aggregate.
    pub data: Vec<ChoroplethRegion>,
    pub kind: ScaleKind,
    /// `None` when no region reported anything.
    pub range: Option<ValueRange>,
}

impl ChoroplethData {
    /// Value of `region` at `week` on the colour-scale axis: per 100,000
    /// population for sequential maps, the raw value for diverging ones.
    pub fn scaled_value(
        &self,
        region: &ChoroplethRegion,
        week: usize,
        population: &PopulationTable,
    ) -> Option<f64> {
        let value = region.values.get(week).copied().flatten()?;
        match self.kind {
            ScaleKind::Sequential => {
                let pop = population.get(region.states.first()?)?;
                Some(value / pop * PER_CAPITA)
            }
            ScaleKind::Diverging => Some(value),
        }
    }

    /// Decorated reading of `region` at `week`, as reported in the data file.
    pub fn decorated_value(&self, region: &ChoroplethRegion, week: usize) -> Option<String> {
        let value = region.values.get(week).copied().flatten()?;
        Some(self.kind.decorate(value))
    }
}

/// Readings that count towards a range: present, non-zero and not NaN.
fn readings(values: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    values.iter().flatten().copied().filter(|v| *v != 0.0 && !v.is_nan())
}

fn extent(values: impl Iterator<Item = f64>) -> Option<ValueRange> {
    values.map(ValueRange::point).reduce(ValueRange::merge)
}

/// Colour range of the map in cases per 100,000 population.
///
/// The first region (the national aggregate) is always excluded. Each other
/// region contributes its smallest and largest reading divided by the
/// population of its first state code. Regions without readings contribute
/// nothing; `None` is returned when no region has a reading.
pub fn choropleth_range(
    regions: &[ChoroplethRegion],
    population: &PopulationTable,
) -> DeriveResult<Option<ValueRange>> {
    let mut range: Option<ValueRange> = None;
    for region in regions.iter().skip(1) {
        let code = region
            .states
            .first()
            .ok_or_else(|| DeriveError::MissingPopulation(region.region.clone()))?;
        let pop = population
            .get(code)
            .ok_or_else(|| DeriveError::MissingPopulation(code.clone()))?;

        let Some(own) = extent(readings(&region.values)) else {
            continue;
        };
        let own = ValueRange {
            min: own.min / pop * PER_CAPITA,
            max: own.max / pop * PER_CAPITA,
        };
        range = Some(range.map_or(own, |r| r.merge(own)));
    }
    Ok(range)
}

/// Percent change of each value from `baseline`.
fn baseline_scale(values: &[Option<f64>], baseline: Option<f64>) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| match (v, baseline) {
            (Some(v), Some(b)) if b != 0.0 => Some((v / b - 1.0) * 100.0),
            _ => None,
        })
        .collect()
}

impl View<'_> {
    /// Map data for every region of the selected season.
    pub fn choropleth_data(&self) -> DeriveResult<ChoroplethData> {
        let metadata = self.metadata()?;
        let season_id = self.selected_season_id()?;
        let season = self.dataset.season(season_id).ok_or_else(|| DeriveError::NotLoaded {
            kind: "season",
            id: season_id.to_string(),
        })?;
        let relative = self.selection.choropleth_relative;
        if season.regions.len() != metadata.region_data.len() {
            return Err(DeriveError::OutOfRange {
                kind: "region",
                index: season.regions.len(),
                len: metadata.region_data.len(),
            });
        }

        let regions: Vec<ChoroplethRegion> = season
            .regions
            .iter()
            .zip(&metadata.region_data)
            .map(|(reg, meta)| {
                let values: Vec<Option<f64>> = reg.actual.iter().map(|d| d.actual).collect();
                ChoroplethRegion {
                    region: meta.sub_id.clone(),
                    states: meta.states.clone(),
                    values: if relative {
                        baseline_scale(&values, reg.baseline)
                    } else {
                        values
                    },
                }
            })
            .collect();

        let (kind, range) = if relative {
            let scaled = regions.iter().skip(1).flat_map(|r| r.values.iter().flatten().copied());
            (ScaleKind::Diverging, extent(scaled.filter(|v| !v.is_nan())))
        } else {
            (ScaleKind::Sequential, choropleth_range(&regions, self.population)?)
        };

        Ok(ChoroplethData {
            data: regions.into_iter().skip(1).collect(),
            kind,
            range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, ScoreCatalog};
    use crate::derive::fixtures;
    use crate::selection::Selection;

    fn assert_close(range: Option<ValueRange>, expected: [f64; 2]) {
        let [min, max] = range.expect("range").as_array();
        assert!((min - expected[0]).abs() < 1e-9, "min {min} != {}", expected[0]);
        assert!((max - expected[1]).abs() < 1e-9, "max {max} != {}", expected[1]);
    }

    fn region(name: &str, state: &str, values: &[Option<f64>]) -> ChoroplethRegion {
        ChoroplethRegion {
            region: name.to_string(),
            states: vec![state.to_string()],
            values: values.to_vec(),
        }
    }

    #[test]
    fn range_ignores_first_region() {
        let regions = vec![
            region("US National", "US", &[Some(100.0), Some(200.0)]),
            region("California", "CA", &[Some(50.0)]),
        ];
        let pop: PopulationTable = [("US", 1000.0), ("CA", 500.0)].into_iter().collect();
        assert_close(choropleth_range(&regions, &pop).unwrap(), [10_000.0, 10_000.0]);
    }

    #[test]
    fn first_region_needs_no_population() {
        let regions = vec![
            region("Nowhere", "ZZ", &[Some(1e9)]),
            region("California", "CA", &[Some(5.0), Some(20.0)]),
            region("New York", "NY", &[Some(1.0)]),
        ];
        let pop: PopulationTable = [("CA", 100_000.0), ("NY", 200_000.0)].into_iter().collect();
        assert_close(choropleth_range(&regions, &pop).unwrap(), [0.5, 20.0]);
    }

    #[test]
    fn falsy_readings_are_skipped() {
        let regions = vec![
            region("US National", "US", &[]),
            region("California", "CA", &[None, Some(0.0), Some(f64::NAN), Some(4.0), Some(8.0)]),
            region("New York", "NY", &[None, Some(0.0)]),
        ];
        let pop: PopulationTable = [("CA", 100_000.0), ("NY", 100_000.0)].into_iter().collect();
        assert_close(choropleth_range(&regions, &pop).unwrap(), [4.0, 8.0]);
    }

    #[test]
    fn no_readings_gives_no_range() {
        let regions = vec![region("US National", "US", &[Some(1.0)]), region("California", "CA", &[None])];
        let pop: PopulationTable = [("CA", 1.0)].into_iter().collect();
        assert_eq!(choropleth_range(&regions, &pop).unwrap(), None);
    }

    #[test]
    fn missing_population_is_an_error() {
        let regions = vec![region("US National", "US", &[]), region("Atlantis", "AT", &[Some(3.0)])];
        let pop: PopulationTable = [("US", 1.0)].into_iter().collect();
        assert_eq!(
            choropleth_range(&regions, &pop).unwrap_err(),
            DeriveError::MissingPopulation("AT".into())
        );
    }

    #[test]
    fn region_without_state_codes_is_an_error() {
        let regions = vec![
            region("US National", "US", &[]),
            ChoroplethRegion { region: "Region 1".into(), states: vec![], values: vec![Some(1.0)] },
        ];
        assert_eq!(
            choropleth_range(&regions, &PopulationTable::default()).unwrap_err(),
            DeriveError::MissingPopulation("Region 1".into())
        );
    }

    #[test]
    fn decorations() {
        assert_eq!(ScaleKind::Sequential.decorate(1.5), "1.50 %");
        assert_eq!(ScaleKind::Diverging.decorate(-20.0), "-20.00 % (baseline)");
        assert_eq!(ScaleKind::Sequential.legend_label(3.0), "3.00 per 100k");
        assert_eq!(ScaleKind::Diverging.legend_label(50.0), "50.00 % (baseline)");
    }

    fn choropleth(relative: bool) -> ChoroplethData {
        choropleth_of(&fixtures::dataset(), relative).unwrap()
    }

    fn choropleth_of(dataset: &Dataset, relative: bool) -> DeriveResult<ChoroplethData> {
        let catalog = ScoreCatalog::default();
        let population: PopulationTable = [("CA", 100_000.0), ("NY", 200_000.0)].into_iter().collect();
        let selection = Selection { season: 2, choropleth_relative: relative, ..Default::default() };
        let view = View { dataset, selection: &selection, catalog: &catalog, population: &population };
        view.choropleth_data()
    }

    #[test]
    fn absolute_map_drops_national_region() {
        let data = choropleth(false);
        assert_eq!(data.kind, ScaleKind::Sequential);
        let names: Vec<&str> = data.data.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["California", "New York"]);
        // CA reports 4..12 per 100k people, NY 6..18 per 200k people
        assert_close(data.range, [3.0, 12.0]);
        assert_eq!(data, choropleth(false));
    }

    #[test]
    fn relative_map_scales_by_baseline() {
        let data = choropleth(true);
        assert_eq!(data.kind, ScaleKind::Diverging);
        // CA: 4, 8, 12 against baseline 2
        assert_eq!(data.data[0].values, vec![Some(100.0), Some(300.0), Some(500.0)]);
        assert_close(data.range, [100.0, 800.0]);
    }

    #[test]
    fn scaled_value_is_per_capita_for_absolute_maps() {
        let data = choropleth(false);
        let pop: PopulationTable = [("CA", 100_000.0)].into_iter().collect();
        let value = data.scaled_value(&data.data[0], 1, &pop).unwrap();
        assert!((value - 8.0).abs() < 1e-9);
        assert_eq!(data.scaled_value(&data.data[0], 9, &pop), None);
        assert_eq!(data.scaled_value(&data.data[1], 0, &pop), None);
    }

    #[test]
    fn hover_shows_raw_reading() {
        let data = choropleth(false);
        // CA week 1 is 8 wILI %, i.e. 8 per 100k for a 100k population
        assert_eq!(data.decorated_value(&data.data[0], 1).as_deref(), Some("8.00 %"));
        assert_eq!(data.decorated_value(&data.data[0], 9), None);
    }

    #[test]
    fn season_regions_must_match_metadata() {
        let mut dataset = fixtures::dataset();
        dataset.season_data[1].regions.pop();
        assert_eq!(
            choropleth_of(&dataset, false).unwrap_err(),
            DeriveError::OutOfRange { kind: "region", index: 2, len: 3 }
        );
    }
}
