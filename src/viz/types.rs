//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};

use super::style::ChartStyle;
use crate::models::{Point, SurfaceSize};

/// Top of the value axis in the dashboard's energy chart (kW).
pub const DEFAULT_VALUE_RANGE_MAX: f64 = 4.0;

/// Hours between vertical grid lines.
pub const DEFAULT_HOUR_GRID_STEP: u32 = 4;

/// Number of horizontal bands the value range is divided into.
pub const DEFAULT_VALUE_BANDS: u32 = 4;

/// Upper bound on `value_bands`.
pub const MAX_VALUE_BANDS: u32 = 64;

/// Inclusive range of values a sample may take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Rendering parameters: axis scale, accepted domain, grid density and style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Value drawn at the top edge; 0 is always the bottom edge.
    pub value_range_max: f64,
    /// Values outside this range are rejected before drawing.
    pub domain: ValueDomain,
    pub hour_grid_step: u32,
    pub value_bands: u32,
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            value_range_max: DEFAULT_VALUE_RANGE_MAX,
            domain: ValueDomain::new(0.0, DEFAULT_VALUE_RANGE_MAX),
            hour_grid_step: DEFAULT_HOUR_GRID_STEP,
            value_bands: DEFAULT_VALUE_BANDS,
            style: ChartStyle::default(),
        }
    }
}

/// A straight grid segment in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Geometry of one frame, computed before anything is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub size: SurfaceSize,
    pub vertical_grid: Vec<GridLine>,
    pub horizontal_grid: Vec<GridLine>,
    /// One point per sample, in sample order; also the marker centers.
    pub points: Vec<Point>,
}

impl ChartLayout {
    pub fn grid_lines(&self) -> impl Iterator<Item = &GridLine> {
        self.vertical_grid.iter().chain(self.horizontal_grid.iter())
    }
}
