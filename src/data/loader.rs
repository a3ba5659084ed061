use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;

use super::model::{DataFile, Dataset};

pub const METADATA_FILE: &str = "metadata.json";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every data file found in `dir`.
///
/// Layout:
/// * `metadata.json`            – seasons and regions (required)
/// * `season-<season>.json`     – observations and model forecasts
/// * `scores-<season>.json`     – per-model scores
/// * `dist-<season>-<region>.json` – probability curves
///
/// Other files are ignored. Files are read in name order.
pub fn load_dir(dir: &Path) -> Result<Dataset> {
    let metadata_path = dir.join(METADATA_FILE);
    if !metadata_path.is_file() {
        bail!("{} not found in {}", METADATA_FILE, dir.display());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_data_file(p))
        .collect();
    paths.sort();

    let mut dataset = Dataset::default();
    for path in &paths {
        dataset.insert(load_file(path)?);
    }

    log::info!(
        "Loaded {} seasons, {} score sets and {} distribution sets from {}",
        dataset.season_data.len(),
        dataset.scores_data.len(),
        dataset.dist_data.len(),
        dir.display()
    );
    Ok(dataset)
}

/// Load a single data file. Dispatch by file-name prefix.
pub fn load_file(path: &Path) -> Result<DataFile> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "json" {
        bail!("Unsupported file extension: .{ext}");
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let file = match file_kind(stem) {
        Some(FileKind::Metadata) => DataFile::Metadata(read_json(path)?),
        Some(FileKind::Season) => DataFile::Season(read_json(path)?),
        Some(FileKind::Scores) => DataFile::Scores(read_json(path)?),
        Some(FileKind::Dist) => DataFile::Dist(read_json(path)?),
        None => bail!("Unrecognised data file name: {}", path.display()),
    };
    log::debug!("Parsed {}", path.display());
    Ok(file)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Metadata,
    Season,
    Scores,
    Dist,
}

fn file_kind(stem: &str) -> Option<FileKind> {
    if stem == "metadata" {
        Some(FileKind::Metadata)
    } else if stem.starts_with("season-") {
        Some(FileKind::Season)
    } else if stem.starts_with("scores-") {
        Some(FileKind::Scores)
    } else if stem.starts_with("dist-") {
        Some(FileKind::Dist)
    } else {
        None
    }
}

fn is_data_file(path: &Path) -> bool {
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    is_json && file_kind(stem).is_some()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}
