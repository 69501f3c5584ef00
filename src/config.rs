//! Configuration: optional TOML file plus environment overrides.
//!
//! Lookup order: an explicit path, then `$IOTDASH_CONFIG`, then
//! `<config dir>/iotdash/config.toml`; built-in defaults otherwise.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::SurfaceSize;
use crate::scheduler::Schedule;
use crate::viz::{ChartConfig, layout};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chart: ChartConfig,
    pub surface: SurfaceSize,
    pub refresh: RefreshConfig,
}

/// Refresh cadences of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Energy readout and chart.
    pub chart_interval_secs: u64,
    /// Temperature / humidity readout.
    pub climate_interval_secs: u64,
    /// Delay before the first chart draw.
    pub initial_delay_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            chart_interval_secs: 10,
            climate_interval_secs: 5,
            initial_delay_ms: 1000,
        }
    }
}

impl RefreshConfig {
    pub fn chart_schedule(&self) -> Schedule {
        Schedule::every(Duration::from_secs(self.chart_interval_secs))
            .with_initial_delay(Duration::from_millis(self.initial_delay_ms))
    }

    pub fn climate_schedule(&self) -> Schedule {
        Schedule::every(Duration::from_secs(self.climate_interval_secs))
    }
}

pub const CONFIG_ENV: &str = "IOTDASH_CONFIG";

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file (if any), load it and apply env overrides.
    ///
    /// An explicitly named file that fails to load is an error; an invalid
    /// file found by default lookup is reported and skipped.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::load(path)?
        } else if let Ok(path) = std::env::var(CONFIG_ENV) {
            Self::load(Path::new(&path))?
        } else {
            match default_config_path().filter(|p| p.exists()) {
                Some(path) => match Self::load(&path) {
                    Ok(c) => {
                        info!("loaded config from {}", path.display());
                        c
                    }
                    Err(e) => {
                        warn!("ignoring config {}: {e:#}", path.display());
                        Config::default()
                    }
                },
                None => Config::default(),
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        let parse = |key: &str| -> Option<f64> {
            let raw = std::env::var(key).ok()?;
            match raw.trim().parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("ignoring {key}={raw:?}: not a number");
                    None
                }
            }
        };
        if let Some(w) = parse("IOTDASH_WIDTH") {
            self.surface.width = w;
        }
        if let Some(h) = parse("IOTDASH_HEIGHT") {
            self.surface.height = h;
        }
        if let Some(r) = parse("IOTDASH_PIXEL_RATIO") {
            self.surface.pixel_ratio = r;
        }
    }

    pub fn validate(&self) -> Result<()> {
        layout::validate_config(&self.chart)?;
        self.surface.pixel_dims().context("invalid [surface] size")?;
        if self.refresh.chart_interval_secs == 0 || self.refresh.climate_interval_secs == 0 {
            bail!("refresh intervals must be at least one second");
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("iotdash").join("config.toml"))
}

/// The built-in defaults as a TOML document.
pub fn generate_default_config() -> Result<String> {
    Ok(toml::to_string_pretty(&Config::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::style::Rgb8;
    use tempfile::tempdir;

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = generate_default_config().unwrap();
        assert!(text.contains("[chart]"));
        assert!(text.contains("#3498DB"));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(
            &path,
            "[surface]\nwidth = 480.0\n\n[chart.style]\nmarker_color = \"#ff0000\"\n",
        )
        .unwrap();
        let c = Config::load(&path).unwrap();
        assert_eq!(c.surface.width, 480.0);
        assert_eq!(c.surface.height, 300.0);
        assert_eq!(c.chart.style.marker_color, Rgb8::new(255, 0, 0));
        assert_eq!(c.chart.value_range_max, 4.0);
        assert_eq!(c.refresh.chart_interval_secs, 10);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[chart]\nvalue_range_max = -1.0\n").unwrap();
        assert!(Config::load(&path).is_err());

        std::fs::write(&path, "[refresh]\nchart_interval_secs = 0\n").unwrap();
        assert!(Config::load(&path).is_err());

        std::fs::write(&path, "[chart]\nvalue_bands = 4294967295\n").unwrap();
        assert!(Config::load(&path).is_err());

        std::fs::write(&path, "[surface]\nwidth = 1e9\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn chart_schedule_uses_initial_delay() {
        let s = RefreshConfig::default().chart_schedule();
        assert_eq!(s.initial_delay, Duration::from_millis(1000));
        assert_eq!(s.interval, Duration::from_secs(10));
    }
}
