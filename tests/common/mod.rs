#![allow(dead_code)]

use std::path::Path;

use serde_json::{Value, json};

pub fn write_json(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn metadata() -> Value {
    json!({
        "updateTime": "2020-01-10",
        "seasonIds": ["2018-2019", "2019-2020"],
        "regionData": [
            { "id": "nat", "subId": "US National", "states": ["US"] },
            { "id": "tx", "subId": "Texas", "states": ["TX"] },
            { "id": "vt", "subId": "Vermont", "states": ["VT"] }
        ]
    })
}

/// Season with the given actual values per region (national first).
pub fn season(id: &str, first_week: u32, actual: &[&[Option<f64>]]) -> Value {
    let regions: Vec<Value> = ["nat", "tx", "vt"]
        .iter()
        .zip(actual)
        .map(|(rid, values)| {
            json!({
                "id": rid,
                "baseline": 2.0,
                "actual": values
                    .iter()
                    .enumerate()
                    .map(|(w, v)| json!({ "week": first_week + w as u32, "actual": v }))
                    .collect::<Vec<_>>(),
                "models": [
                    { "id": "kcde", "predictions": [ { "series": [ { "point": 2.5 } ] } ] },
                    { "id": "sarima", "predictions": [] }
                ]
            })
        })
        .collect();
    json!({ "seasonId": id, "regions": regions })
}

pub fn scores(id: &str) -> Value {
    json!({
        "seasonId": id,
        "regions": [
            { "id": "nat", "models": [
                { "id": "kcde", "scores": { "1-ahead": { "logScore": -0.7, "absError": 0.4 } } },
                { "id": "sarima", "scores": { "1-ahead": { "logScore": -0.7, "absError": 0.3 } } }
            ] },
            { "id": "tx", "models": [] }
        ]
    })
}

/// A populated data directory: two seasons, scores and a distribution file.
pub fn write_data_dir(dir: &Path) {
    write_json(dir, "metadata.json", &metadata());
    write_json(
        dir,
        "season-2018-2019.json",
        &season(
            "2018-2019",
            201840,
            &[
                &[Some(1.0), Some(1.5), Some(2.0), Some(2.5)],
                &[Some(10.0), Some(20.0), Some(30.0), Some(40.0)],
                &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
            ],
        ),
    );
    write_json(
        dir,
        "season-2019-2020.json",
        &season(
            "2019-2020",
            201940,
            &[
                &[Some(1.2), Some(1.8)],
                &[Some(29.0), Some(58.0)],
                &[None, Some(0.0)],
            ],
        ),
    );
    write_json(dir, "scores-2019-2020.json", &scores("2019-2020"));
    write_json(
        dir,
        "dist-2019-2020-nat.json",
        &json!({
            "seasonId": "2019-2020",
            "regionId": "nat",
            "models": [
                { "id": "kcde", "curves": [
                    [ { "target": "1-ahead", "data": [[1.0, 0.2], [2.0, 0.8]] } ],
                    [ { "target": "1-ahead", "data": [[1.0, 0.5], [2.0, 0.5]] } ]
                ] }
            ]
        }),
    );
    std::fs::write(dir.join("population.csv"), "code,population\nUS,1000000\nTX,2900000\nVT,100000\n")
        .unwrap();
    write_json(
        dir,
        "dashboard.json",
        &json!({ "branding": { "title": "Test Flu" }, "populationFile": "population.csv" }),
    );
}
