use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metadata – seasons and regions known to the dashboard
// ---------------------------------------------------------------------------

/// One reporting region as listed in `metadata.json`.
/// Index 0 of the region list is always the national aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMeta {
    pub id: String,
    /// Display name used by the selectors.
    pub sub_id: String,
    /// State / territory codes covered by this region.
    #[serde(default)]
    pub states: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub update_time: String,
    /// Ordered oldest → newest.
    pub season_ids: Vec<String>,
    pub region_data: Vec<RegionMeta>,
}

// ---------------------------------------------------------------------------
// Season data – observations and model forecasts
// ---------------------------------------------------------------------------

/// A single observed week. `week` is an epiweek such as `201740`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPoint {
    pub week: u32,
    #[serde(default)]
    pub actual: Option<f64>,
}

/// One forecast horizon of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub point: f64,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub series: Vec<SeriesPoint>,
}

/// Forecasts of one model; `predictions[i]` was issued at week index `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSeries {
    pub id: String,
    #[serde(default)]
    pub predictions: Vec<Option<Prediction>>,
}

impl ModelSeries {
    /// Prediction issued at `week_idx`, if the model made one.
    pub fn prediction_at(&self, week_idx: usize) -> Option<&Prediction> {
        self.predictions.get(week_idx).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeries {
    pub id: String,
    pub actual: Vec<WeekPoint>,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub models: Vec<ModelSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonData {
    pub season_id: String,
    /// Same order as [`Metadata::region_data`].
    pub regions: Vec<RegionSeries>,
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// `scores[target][metric]`, e.g. `scores["1-ahead"]["logScore"]`.
pub type TargetScores = BTreeMap<String, BTreeMap<String, Option<f64>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    pub id: String,
    pub scores: TargetScores,
}

impl ModelScores {
    pub fn score(&self, target: &str, metric: &str) -> Option<f64> {
        self.scores.get(target)?.get(metric).copied().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionScores {
    pub id: String,
    pub models: Vec<ModelScores>,
}

impl RegionScores {
    pub fn model(&self, id: &str) -> Option<&ModelScores> {
        self.models.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresData {
    pub season_id: String,
    pub regions: Vec<RegionScores>,
}

/// Which extreme of a metric is the better one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BestFunc {
    Min,
    Max,
}

impl BestFunc {
    /// Best value among `values`, ignoring NaN. `None` for an empty input.
    pub fn pick<I: IntoIterator<Item = f64>>(self, values: I) -> Option<f64> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .reduce(|a, b| match self {
                BestFunc::Min => a.min(b),
                BestFunc::Max => a.max(b),
            })
    }
}

/// A scoring metric offered in the score selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMeta {
    pub id: String,
    pub name: String,
    pub best: BestFunc,
}

/// Score metrics and forecast targets shown in the score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCatalog {
    pub metas: Vec<ScoreMeta>,
    pub targets: Vec<String>,
}

impl Default for ScoreCatalog {
    fn default() -> Self {
        let meta = |id: &str, name: &str, best| ScoreMeta {
            id: id.to_string(),
            name: name.to_string(),
            best,
        };
        Self {
            metas: vec![
                meta("logScore", "Log Score", BestFunc::Max),
                meta("absError", "Absolute Error", BestFunc::Min),
                meta("probScore", "Probability Score", BestFunc::Max),
            ],
            targets: (1..=4).map(|k| format!("{k}-ahead")).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

/// Probability curve of one target: `[bin, probability]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCurve {
    pub target: String,
    pub data: Vec<[f64; 2]>,
}

/// `curves[i]` holds the per-target curves issued at week index `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCurves {
    pub id: String,
    #[serde(default)]
    pub curves: Vec<Option<Vec<TargetCurve>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistData {
    pub season_id: String,
    pub region_id: String,
    pub models: Vec<ModelCurves>,
}

impl DistData {
    pub fn key(&self) -> DistKey {
        DistKey::new(&self.season_id, &self.region_id)
    }
}

/// `"{season}-{region}"` identifier of a downloaded distribution file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistKey(String);

impl DistKey {
    pub fn new(season_id: &str, region_id: &str) -> Self {
        DistKey(format!("{season_id}-{region_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Dataset – everything downloaded so far
// ---------------------------------------------------------------------------

/// One parsed input file.
#[derive(Debug, Clone, PartialEq)]
pub enum DataFile {
    Metadata(Metadata),
    Season(SeasonData),
    Scores(ScoresData),
    Dist(DistData),
}

/// The in-memory store the derivations read from.
/// Records keep their download order; re-inserting a key replaces in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub metadata: Option<Metadata>,
    pub season_data: Vec<SeasonData>,
    pub scores_data: Vec<ScoresData>,
    pub dist_data: Vec<DistData>,
}

impl Dataset {
    pub fn insert(&mut self, file: DataFile) {
        match file {
            DataFile::Metadata(meta) => self.metadata = Some(meta),
            DataFile::Season(season) => {
                upsert(&mut self.season_data, season, |a, b| a.season_id == b.season_id)
            }
            DataFile::Scores(scores) => {
                upsert(&mut self.scores_data, scores, |a, b| a.season_id == b.season_id)
            }
            DataFile::Dist(dist) => upsert(&mut self.dist_data, dist, |a, b| a.key() == b.key()),
        }
    }

    /// Season ids with downloaded season data, in download order.
    pub fn downloaded_seasons(&self) -> Vec<&str> {
        self.season_data.iter().map(|d| d.season_id.as_str()).collect()
    }

    /// Season ids with downloaded scores, in download order.
    pub fn downloaded_scores(&self) -> Vec<&str> {
        self.scores_data.iter().map(|d| d.season_id.as_str()).collect()
    }

    pub fn downloaded_dists(&self) -> Vec<DistKey> {
        self.dist_data.iter().map(DistData::key).collect()
    }

    pub fn season(&self, season_id: &str) -> Option<&SeasonData> {
        self.season_data.iter().find(|d| d.season_id == season_id)
    }

    pub fn scores(&self, season_id: &str) -> Option<&ScoresData> {
        self.scores_data.iter().find(|d| d.season_id == season_id)
    }

    pub fn dist(&self, key: &DistKey) -> Option<&DistData> {
        self.dist_data.iter().find(|d| d.key() == *key)
    }
}

fn upsert<T>(records: &mut Vec<T>, record: T, same: impl Fn(&T, &T) -> bool) {
    match records.iter_mut().find(|r| same(r, &record)) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(id: &str, weeks: usize) -> SeasonData {
        SeasonData {
            season_id: id.to_string(),
            regions: vec![RegionSeries {
                id: "nat".into(),
                actual: (0..weeks)
                    .map(|w| WeekPoint { week: 201740 + w as u32, actual: Some(1.0) })
                    .collect(),
                baseline: None,
                models: Vec::new(),
            }],
        }
    }

    #[test]
    fn reinserting_a_season_replaces_it_in_place() {
        let mut ds = Dataset::default();
        ds.insert(DataFile::Season(season("2017-2018", 3)));
        ds.insert(DataFile::Season(season("2018-2019", 3)));
        ds.insert(DataFile::Season(season("2017-2018", 5)));

        assert_eq!(ds.downloaded_seasons(), vec!["2017-2018", "2018-2019"]);
        assert_eq!(ds.season("2017-2018").unwrap().regions[0].actual.len(), 5);
    }

    #[test]
    fn best_func_skips_nan() {
        assert_eq!(BestFunc::Min.pick([3.0, f64::NAN, 1.5]), Some(1.5));
        assert_eq!(BestFunc::Max.pick([f64::NAN, -2.0, -1.0]), Some(-1.0));
        assert_eq!(BestFunc::Max.pick(std::iter::empty()), None);
    }

    #[test]
    fn model_scores_tolerate_null_entries() {
        let scores: ModelScores = serde_json::from_value(serde_json::json!({
            "id": "m1",
            "scores": { "1-ahead": { "logScore": null, "absError": 0.25 } }
        }))
        .unwrap();
        assert_eq!(scores.score("1-ahead", "logScore"), None);
        assert_eq!(scores.score("1-ahead", "absError"), Some(0.25));
        assert_eq!(scores.score("2-ahead", "absError"), None);
    }
}
