use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Population estimates for US states, DC, territories and the nation.
const BUNDLED_CSV: &str = include_str!("../../assets/population.csv");

// ---------------------------------------------------------------------------
// Population table: region code → population
// ---------------------------------------------------------------------------

/// Reference populations used to express choropleth values per 100,000.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationTable {
    by_code: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct PopulationRow {
    code: String,
    population: f64,
}

impl PopulationTable {
    /// The table shipped with the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_csv_reader(BUNDLED_CSV.as_bytes()).context("parsing bundled population table")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening population table {}", path.display()))?;
        Self::from_csv_reader(file)
            .with_context(|| format!("parsing population table {}", path.display()))
    }

    /// CSV layout: header `code,population`, one region per row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut by_code = BTreeMap::new();
        for (row_no, result) in reader.deserialize::<PopulationRow>().enumerate() {
            let row = result.with_context(|| format!("population row {row_no}"))?;
            if row.population.is_nan() || row.population <= 0.0 {
                bail!("population row {row_no}: '{}' has non-positive population", row.code);
            }
            let code = row.code.trim().to_string();
            if by_code.contains_key(&code) {
                bail!("population row {row_no}: duplicate code '{code}'");
            }
            by_code.insert(code, row.population);
        }
        Ok(PopulationTable { by_code })
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.by_code.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PopulationTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        PopulationTable {
            by_code: iter.into_iter().map(|(code, pop)| (code.into(), pop)).collect(),
        }
    }
}
