//! Sample sources: where each frame's 24 values come from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use crate::error::{ChartError, ChartResult};
use crate::models::{SAMPLE_COUNT, SampleSet};
use crate::storage;

/// Supplies a fresh sample set for every render.
pub trait SampleSource: Send {
    fn next_samples(&mut self) -> ChartResult<SampleSet>;
}

/// Uniformly random hourly load, `[low, high)`. Defaults to the dashboard's 1–4 kW.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    low: f64,
    high: f64,
}

impl RandomSource {
    pub fn new(low: f64, high: f64) -> ChartResult<Self> {
        Self::with_rng(StdRng::from_entropy(), low, high)
    }

    /// Deterministic sequence, for tests and reproducible renders.
    pub fn seeded(seed: u64, low: f64, high: f64) -> ChartResult<Self> {
        Self::with_rng(StdRng::seed_from_u64(seed), low, high)
    }

    fn with_rng(rng: StdRng, low: f64, high: f64) -> ChartResult<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(ChartError::InvalidInput(format!(
                "random range [{low}, {high}) is empty or not finite"
            )));
        }
        Ok(Self { rng, low, high })
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            low: 1.0,
            high: 4.0,
        }
    }
}

impl SampleSource for RandomSource {
    fn next_samples(&mut self) -> ChartResult<SampleSet> {
        let values = (0..SAMPLE_COUNT)
            .map(|_| self.rng.gen_range(self.low..self.high))
            .collect();
        SampleSet::new(values)
    }
}

/// Always yields the same set.
#[derive(Debug, Clone)]
pub struct FixedSource(pub SampleSet);

impl SampleSource for FixedSource {
    fn next_samples(&mut self) -> ChartResult<SampleSet> {
        Ok(self.0.clone())
    }
}

/// Re-reads a CSV or JSON sample file on every call (format from the extension).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for FileSource {
    fn next_samples(&mut self) -> ChartResult<SampleSet> {
        storage::load_samples(&self.path).map_err(|e| ChartError::Source(format!("{e:#}")))
    }
}
