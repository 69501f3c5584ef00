//! Simulated home sensor readings shown next to the energy chart.
//!
//! Ranges follow the dashboard's simulation: temperature 20–30 °C, humidity
//! 40–80 %, power 1.5–3.5 kW, daily usage 15–20 kWh, monthly 450–500 kWh.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature range covered by the progress bar.
pub const TEMPERATURE_SCALE_C: (f64, f64) = (20.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

impl ClimateReading {
    /// Progress-bar fill for the temperature, 0–100 %.
    pub fn temperature_progress(&self) -> f64 {
        let (lo, hi) = TEMPERATURE_SCALE_C;
        ((self.temperature_c - lo) / (hi - lo) * 100.0).clamp(0.0, 100.0)
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1}", self.temperature_c)
    }

    pub fn humidity_label(&self) -> String {
        format!("{}", self.humidity_pct.round() as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub power_kw: f64,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
}

impl EnergyReading {
    pub fn power_label(&self) -> String {
        format!("{:.1} kW", self.power_kw)
    }

    pub fn daily_label(&self) -> String {
        format!("{:.1} kWh", self.daily_kwh)
    }

    pub fn monthly_label(&self) -> String {
        format!("{} kWh", self.monthly_kwh.round() as i64)
    }
}

/// One snapshot of every readout on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub taken_at: DateTime<Local>,
    pub climate: ClimateReading,
    pub energy: EnergyReading,
}

/// `YYYY/MM/DD HH:MM:SS`, the dashboard clock format.
pub fn format_timestamp(t: &DateTime<Local>) -> String {
    t.format("%Y/%m/%d %H:%M:%S").to_string()
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "time         {}", format_timestamp(&self.taken_at))?;
        writeln!(
            f,
            "temperature  {} °C ({:.0}%)",
            self.climate.temperature_label(),
            self.climate.temperature_progress()
        )?;
        writeln!(f, "humidity     {} %", self.climate.humidity_label())?;
        writeln!(f, "power        {}", self.energy.power_label())?;
        writeln!(f, "daily usage  {}", self.energy.daily_label())?;
        write!(f, "monthly      {}", self.energy.monthly_label())
    }
}

/// Random stand-in for real sensors.
#[derive(Debug, Clone)]
pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn climate(&mut self) -> ClimateReading {
        ClimateReading {
            temperature_c: self.rng.gen_range(20.0..30.0),
            humidity_pct: self.rng.gen_range(40.0..80.0),
        }
    }

    pub fn energy(&mut self) -> EnergyReading {
        EnergyReading {
            power_kw: self.rng.gen_range(1.5..3.5),
            daily_kwh: self.rng.gen_range(15.0..20.0),
            monthly_kwh: self.rng.gen_range(450.0..500.0),
        }
    }

    pub fn readout(&mut self) -> Readout {
        Readout {
            taken_at: Local::now(),
            climate: self.climate(),
            energy: self.energy(),
        }
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}
