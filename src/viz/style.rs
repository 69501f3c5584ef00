//! Colors and stroke styles for the energy chart.
//!
//! Colors are plain 8-bit RGB triples so they can round-trip through config
//! files as `#RRGGBB` strings and be handed to any surface implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #RRGGBB or #RGB")]
pub struct ParseColorError(String);

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB` and the `#RGB` shorthand (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgb8::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc -> #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Rgb8::new(r * 17, g * 17, b * 17))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        c.to_hex()
    }
}

/// Color and width (logical units) of a stroked path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgb8,
    pub width: f64,
}

impl StrokeStyle {
    pub const fn new(color: Rgb8, width: f64) -> Self {
        Self { color, width }
    }
}

/// Visual style of the chart. Defaults match the dashboard's canvas styling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub background: Rgb8,
    pub grid: StrokeStyle,
    pub line: StrokeStyle,
    pub marker_color: Rgb8,
    /// Marker radius in logical units.
    pub marker_radius: f64,
}

/// Light gray grid (#E0E0E0).
pub const GRID_GRAY: Rgb8 = Rgb8::new(0xE0, 0xE0, 0xE0);
/// Series blue (#3498DB).
pub const SERIES_BLUE: Rgb8 = Rgb8::new(0x34, 0x98, 0xDB);

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Rgb8::WHITE,
            grid: StrokeStyle::new(GRID_GRAY, 0.5),
            line: StrokeStyle::new(SERIES_BLUE, 2.0),
            marker_color: SERIES_BLUE,
            marker_radius: 3.0,
        }
    }
}
