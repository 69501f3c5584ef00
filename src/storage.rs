use crate::models::{HourlySample, SampleSet};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save samples as CSV with an `hour,value` header.
pub fn save_csv<P: AsRef<Path>>(samples: &SampleSet, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for row in samples.to_rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save samples as a pretty JSON array of `{hour, value}` objects.
pub fn save_json<P: AsRef<Path>>(samples: &SampleSet, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&samples.to_rows())?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<SampleSet> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let rows = rdr
        .deserialize::<HourlySample>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(SampleSet::from_rows(rows)?)
}

/// Accepts either `[{hour, value}, ...]` or a bare array of 24 numbers.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<SampleSet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let v: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let all_numbers = v
        .as_array()
        .is_some_and(|a| a.iter().all(|x| x.is_number()));
    if all_numbers {
        let values: Vec<f64> = serde_json::from_value(v)?;
        Ok(SampleSet::new(values)?)
    } else {
        let rows: Vec<HourlySample> = serde_json::from_value(v)
            .with_context(|| format!("expected hourly rows in {}", path.display()))?;
        Ok(SampleSet::from_rows(rows)?)
    }
}

/// Load by extension: `.json` as JSON, `.csv` as CSV.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<SampleSet> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        other => bail!("unsupported sample file type: {:?}", other.unwrap_or("")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let set = SampleSet::new(vec![1.23; 24]).unwrap();
        save_csv(&set, &csvp).unwrap();
        save_json(&set, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_samples("samples.txt").unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }
}
