use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{Value, json};

const SEASONS: [&str; 3] = ["2017-2018", "2018-2019", "2019-2020"];
const REGIONS: [(&str, &str, &str); 5] = [
    ("nat", "US National", "US"),
    ("ca", "California", "CA"),
    ("ny", "New York", "NY"),
    ("tx", "Texas", "TX"),
    ("wa", "Washington", "WA"),
];
const MODELS: [&str; 3] = ["KCDE", "SARIMA", "Delphi-Stat"];
const WEEKS: u32 = 30;
const HORIZONS: usize = 4;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Seasonal wILI curve peaking mid-season.
fn epidemic_curve(week: u32, peak: f64, peak_week: f64) -> f64 {
    let w = week as f64;
    1.0 + peak * (-(w - peak_week).powi(2) / 40.0).exp()
}

fn epiweek(season: &str, w: u32) -> u32 {
    let start: u32 = season[..4].parse().unwrap_or(2017);
    let week = 40 + w;
    if week > 52 {
        (start + 1) * 100 + (week - 52)
    } else {
        start * 100 + week
    }
}

fn season_file(season: &str, rng: &mut SimpleRng) -> (Value, Vec<Vec<f64>>) {
    let mut truths = Vec::new();
    let regions: Vec<Value> = REGIONS
        .iter()
        .enumerate()
        .map(|(r, (id, _, _))| {
            let peak = 3.0 + r as f64 * 0.8 + rng.gauss(0.0, 0.5);
            let peak_week = 14.0 + rng.gauss(0.0, 2.0);
            let truth: Vec<f64> = (0..WEEKS)
                .map(|w| (epidemic_curve(w, peak, peak_week) + rng.gauss(0.0, 0.1)).max(0.1))
                .collect();

            let models: Vec<Value> = MODELS
                .iter()
                .enumerate()
                .map(|(m, model)| {
                    let bias = (m as f64 - 1.0) * 0.2;
                    let predictions: Vec<Value> = (0..WEEKS as usize)
                        .map(|w| {
                            let series: Vec<Value> = (1..=HORIZONS)
                                .map(|k| {
                                    let target = truth.get(w + k).copied().unwrap_or(1.0);
                                    let point = target + bias + rng.gauss(0.0, 0.15 * k as f64);
                                    json!({ "point": point, "low": point - 0.5, "high": point + 0.5 })
                                })
                                .collect();
                            json!({ "series": series })
                        })
                        .collect();
                    json!({ "id": model, "predictions": predictions })
                })
                .collect();

            let actual: Vec<Value> = truth
                .iter()
                .enumerate()
                .map(|(w, v)| json!({ "week": epiweek(season, w as u32), "actual": v }))
                .collect();
            truths.push(truth);
            json!({ "id": id, "baseline": 2.2, "actual": actual, "models": models })
        })
        .collect();
    (json!({ "seasonId": season, "regions": regions }), truths)
}

fn scores_file(season: &str, rng: &mut SimpleRng) -> Value {
    let regions: Vec<Value> = REGIONS
        .iter()
        .map(|(id, _, _)| {
            let models: Vec<Value> = MODELS
                .iter()
                .map(|model| {
                    let mut scores = serde_json::Map::new();
                    for k in 1..=HORIZONS {
                        let err = rng.gauss(0.2 * k as f64, 0.05).abs();
                        scores.insert(
                            format!("{k}-ahead"),
                            json!({
                                "logScore": -err * 3.0,
                                "absError": err,
                                "probScore": (-err * 3.0).exp(),
                            }),
                        );
                    }
                    json!({ "id": model, "scores": scores })
                })
                .collect();
            json!({ "id": id, "models": models })
        })
        .collect();
    json!({ "seasonId": season, "regions": regions })
}

fn dist_file(season: &str, region: usize, truth: &[f64]) -> Value {
    let (region_id, _, _) = REGIONS[region];
    let models: Vec<Value> = MODELS
        .iter()
        .enumerate()
        .map(|(m, model)| {
            let sigma = 0.3 + 0.1 * m as f64;
            let curves: Vec<Value> = (0..truth.len())
                .map(|w| {
                    let series: Vec<Value> = (1..=HORIZONS)
                        .map(|k| {
                            let mu = truth.get(w + k).copied().unwrap_or(1.0);
                            let s = sigma * k as f64;
                            let data: Vec<[f64; 2]> = (0..=130)
                                .map(|b| {
                                    let x = b as f64 * 0.1;
                                    [x, (-(x - mu).powi(2) / (2.0 * s * s)).exp() * 0.1 / (s * 2.5066)]
                                })
                                .collect();
                            json!({ "target": format!("{k}-ahead"), "data": data })
                        })
                        .collect();
                    Value::Array(series)
                })
                .collect();
            json!({ "id": model, "curves": curves })
        })
        .collect();
    json!({ "seasonId": season, "regionId": region_id, "models": models })
}

fn write(dir: &std::path::Path, name: &str, value: &Value) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(value)?).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let out = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;

    let mut rng = SimpleRng::new(42);

    let region_data: Vec<Value> = REGIONS
        .iter()
        .map(|(id, name, state)| json!({ "id": id, "subId": name, "states": [state] }))
        .collect();
    write(
        &out,
        "metadata.json",
        &json!({ "updateTime": "2020-05-01", "seasonIds": SEASONS, "regionData": region_data }),
    )?;

    for season in SEASONS {
        let (season_json, truths) = season_file(season, &mut rng);
        write(&out, &format!("season-{season}.json"), &season_json)?;
        write(&out, &format!("scores-{season}.json"), &scores_file(season, &mut rng))?;
        for (r, truth) in truths.iter().enumerate() {
            let (region_id, _, _) = REGIONS[r];
            write(&out, &format!("dist-{season}-{region_id}.json"), &dist_file(season, r, truth))?;
        }
    }

    println!(
        "Wrote {} seasons × {} regions × {} models to {}",
        SEASONS.len(),
        REGIONS.len(),
        MODELS.len(),
        out.display()
    );
    Ok(())
}
