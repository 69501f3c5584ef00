use std::fs;

use iotdash::SampleSet;
use iotdash::source::{FileSource, SampleSource};
use iotdash::storage;

fn sample() -> SampleSet {
    SampleSet::new((0..24).map(|h| 1.0 + h as f64 * 0.125).collect()).unwrap()
}

#[test]
fn save_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let set = sample();

    let csv_path = dir.path().join("samples.csv");
    storage::save_csv(&set, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("hour,value"));
    assert_eq!(csv_txt.lines().count(), 1 + 24);

    let json_path = dir.path().join("samples.json");
    storage::save_json(&set, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 24);
    assert_eq!(rows[2]["hour"], 2);
    assert_eq!(rows[2]["value"], 1.25);
}

#[test]
fn saved_files_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let set = sample();
    let csv_path = dir.path().join("samples.csv");
    let json_path = dir.path().join("samples.json");
    storage::save_csv(&set, &csv_path).unwrap();
    storage::save_json(&set, &json_path).unwrap();

    assert_eq!(storage::load_samples(&csv_path).unwrap(), set);
    assert_eq!(storage::load_samples(&json_path).unwrap(), set);
}

#[test]
fn json_accepts_a_bare_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.json");
    fs::write(&path, serde_json::to_string(&vec![2.5; 24]).unwrap()).unwrap();
    let set = storage::load_json(&path).unwrap();
    assert!(set.iter().all(|v| *v == 2.5));
}

#[test]
fn csv_rows_may_be_unordered_and_padded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shuffled.csv");
    let mut text = String::from("hour, value\n");
    for h in (0..24).rev() {
        text.push_str(&format!("{h}, {}\n", h as f64 / 8.0));
    }
    fs::write(&path, text).unwrap();
    let set = storage::load_csv(&path).unwrap();
    assert_eq!(set[0], 0.0);
    assert_eq!(set[8], 1.0);
    assert_eq!(set[23], 23.0 / 8.0);
}

#[test]
fn short_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.csv");
    fs::write(&path, "hour,value\n0,1.0\n1,2.0\n").unwrap();
    let err = storage::load_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("expected 24"));
}

#[test]
fn file_source_rereads_on_every_call() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("live.json");
    fs::write(&path, serde_json::to_string(&vec![1.0; 24]).unwrap()).unwrap();

    let mut source = FileSource::new(&path);
    assert_eq!(source.next_samples().unwrap()[0], 1.0);

    fs::write(&path, serde_json::to_string(&vec![3.0; 24]).unwrap()).unwrap();
    assert_eq!(source.next_samples().unwrap()[0], 3.0);
}
