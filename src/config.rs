use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::ScoreCatalog;
use crate::data::population::PopulationTable;

pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration (optional `dashboard.json` in the data directory)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub title: String,
    /// Link to the upstream forecast tracker, shown in the top bar.
    pub tracker: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "FluSight".to_string(),
            tracker: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub branding: Branding,
    pub scores: ScoreCatalog,
    /// Population CSV, relative to the data directory. Bundled table if unset.
    pub population_file: Option<PathBuf>,
}

impl DashboardConfig {
    /// Read `dashboard.json` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
            return Ok(Self::default());
        }
        let file = std::fs::File::open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))
    }

    /// Population table named by the config, or the bundled one.
    pub fn population_table(&self, dir: &Path) -> Result<PopulationTable> {
        match &self.population_file {
            Some(rel) => PopulationTable::from_path(&dir.join(rel)),
            None => PopulationTable::bundled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::BestFunc;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: DashboardConfig =
            serde_json::from_str(r#"{ "branding": { "title": "COVID" } }"#).unwrap();
        assert_eq!(cfg.branding.title, "COVID");
        assert_eq!(cfg.scores, ScoreCatalog::default());
        assert!(cfg.population_file.is_none());
    }

    #[test]
    fn score_catalog_reads_best_func() {
        let cfg: DashboardConfig = serde_json::from_str(
            r#"{ "scores": { "metas": [ { "id": "mae", "name": "MAE", "best": "min" } ],
                             "targets": ["1-ahead"] } }"#,
        )
        .unwrap();
        assert_eq!(cfg.scores.metas[0].best, BestFunc::Min);
        assert_eq!(cfg.scores.targets, vec!["1-ahead"]);
    }
}
