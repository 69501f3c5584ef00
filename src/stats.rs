use crate::models::SampleSet;
use serde::{Deserialize, Serialize};

/// Summary statistics for one day of hourly samples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sum of the hourly values (kW over one hour each, i.e. kWh).
    pub total: f64,
    /// First hour holding the maximum.
    pub peak_hour: usize,
}

pub fn summarize(samples: &SampleSet) -> Summary {
    let mut vals = samples.to_vec();
    // SampleSet guarantees finite values, so total_cmp agrees with numeric order.
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let total: f64 = vals.iter().sum();
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };
    let max = vals[count - 1];
    let peak_hour = samples.iter().position(|v| *v == max).unwrap_or(0);
    Summary {
        count,
        min: vals[0],
        max,
        mean: total / count as f64,
        median,
        total,
        peak_hour,
    }
}
