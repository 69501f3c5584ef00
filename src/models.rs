use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Number of hourly buckets in one chart frame.
pub const SAMPLE_COUNT: usize = 24;

/// Exactly [`SAMPLE_COUNT`] finite values, one per hour, in hour order.
///
/// Domain bounds are checked by the renderer against its configuration;
/// this type only guarantees the shape of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSet(Vec<f64>);

impl SampleSet {
    pub fn new(values: Vec<f64>) -> ChartResult<Self> {
        check_shape(&values)?;
        Ok(Self(values))
    }

    /// Build from serialized rows; rows may arrive in any order but must cover hours 0..24 once.
    pub fn from_rows(mut rows: Vec<HourlySample>) -> ChartResult<Self> {
        if rows.len() != SAMPLE_COUNT {
            return Err(ChartError::InvalidInput(format!(
                "expected {} hourly rows, got {}",
                SAMPLE_COUNT,
                rows.len()
            )));
        }
        rows.sort_by_key(|r| r.hour);
        for (expected, row) in rows.iter().enumerate() {
            if row.hour as usize != expected {
                return Err(ChartError::InvalidInput(format!(
                    "hours must be 0..{} without gaps or duplicates (found {} at position {})",
                    SAMPLE_COUNT - 1,
                    row.hour,
                    expected
                )));
            }
        }
        Self::new(rows.into_iter().map(|r| r.value).collect())
    }

    pub fn to_rows(&self) -> Vec<HourlySample> {
        self.0
            .iter()
            .enumerate()
            .map(|(hour, &value)| HourlySample {
                hour: hour as u32,
                value,
            })
            .collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for SampleSet {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SampleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        SampleSet::new(values).map_err(serde::de::Error::custom)
    }
}

/// Length and finiteness check shared by [`SampleSet`] and the renderer.
pub(crate) fn check_shape(values: &[f64]) -> ChartResult<()> {
    if values.len() != SAMPLE_COUNT {
        return Err(ChartError::InvalidInput(format!(
            "expected {} samples, got {}",
            SAMPLE_COUNT,
            values.len()
        )));
    }
    if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ChartError::InvalidInput(format!(
            "sample {i} is not a finite number ({v})"
        )));
    }
    Ok(())
}

/// One serialized observation (a row in CSV / an object in JSON).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub hour: u32,
    pub value: f64,
}

/// Largest backing raster edge, in device pixels.
pub const MAX_RASTER_SIDE: u32 = 16_384;

/// Largest backing raster area, in device pixels (192 MiB as RGB).
pub const MAX_RASTER_PIXELS: u64 = 64 * 1024 * 1024;

/// Logical size of a drawing surface plus its device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Backing raster size in device pixels.
    ///
    /// Fails with [`ChartError::SurfaceUnavailable`] for a non-positive or
    /// non-finite size, or one beyond [`MAX_RASTER_SIDE`] / [`MAX_RASTER_PIXELS`].
    pub fn pixel_dims(&self) -> ChartResult<(u32, u32)> {
        let positive = [self.width, self.height, self.pixel_ratio]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !positive {
            return Err(ChartError::SurfaceUnavailable(format!(
                "surface has no drawable area ({} x {} @ {})",
                self.width, self.height, self.pixel_ratio
            )));
        }
        let w = (self.width * self.pixel_ratio).round().max(1.0);
        let h = (self.height * self.pixel_ratio).round().max(1.0);
        let side = f64::from(MAX_RASTER_SIDE);
        if w > side || h > side || w * h > MAX_RASTER_PIXELS as f64 {
            return Err(ChartError::SurfaceUnavailable(format!(
                "surface of {w} x {h} px exceeds the raster limit \
                 ({MAX_RASTER_SIDE} px per side, {MAX_RASTER_PIXELS} px total)"
            )));
        }
        Ok((w as u32, h as u32))
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(600.0, 300.0, 1.0)
    }
}

/// A position in logical units, origin top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_rejects_wrong_length_and_nan() {
        assert!(SampleSet::new(vec![1.0; 23]).is_err());
        assert!(SampleSet::new(vec![1.0; 25]).is_err());
        let mut v = vec![1.0; SAMPLE_COUNT];
        v[5] = f64::NAN;
        let err = SampleSet::new(v).unwrap_err();
        assert!(err.to_string().contains("sample 5"));
        assert_eq!(SampleSet::new(vec![2.0; SAMPLE_COUNT]).unwrap().len(), 24);
    }

    #[test]
    fn rows_are_reordered_by_hour() {
        let mut rows: Vec<HourlySample> = (0..24)
            .map(|h| HourlySample {
                hour: h,
                value: h as f64 / 10.0,
            })
            .collect();
        rows.reverse();
        let set = SampleSet::from_rows(rows).unwrap();
        assert_eq!(set[0], 0.0);
        assert!((set[23] - 2.3).abs() < 1e-12);
    }

    #[test]
    fn rows_with_duplicate_hour_are_rejected() {
        let mut rows: Vec<HourlySample> = (0..24)
            .map(|h| HourlySample { hour: h, value: 1.0 })
            .collect();
        rows[3].hour = 2;
        assert!(SampleSet::from_rows(rows).is_err());
    }

    #[test]
    fn surface_size_pixel_dims() {
        let s = SurfaceSize::new(240.0, 100.0, 2.0);
        assert_eq!(s.pixel_dims().unwrap(), (480, 200));
        assert!(SurfaceSize::new(0.0, 100.0, 1.0).pixel_dims().is_err());
        assert!(SurfaceSize::new(240.0, f64::NAN, 1.0).pixel_dims().is_err());
    }

    #[test]
    fn oversized_surface_is_unavailable() {
        let huge = SurfaceSize::new(1e12, 1e12, 1.0);
        assert!(huge.pixel_dims().unwrap_err().is_surface_unavailable());
        // each side fits, the area does not
        let wide = SurfaceSize::new(16_000.0, 8_000.0, 1.0);
        assert!(wide.pixel_dims().is_err());
        // the ratio counts too
        assert!(SurfaceSize::new(10_000.0, 100.0, 2.0).pixel_dims().is_err());
        assert_eq!(
            SurfaceSize::new(16_384.0, 100.0, 1.0).pixel_dims().unwrap(),
            (16_384, 100)
        );
    }

    #[test]
    fn sample_set_json_is_validated() {
        let text = serde_json::to_string(&vec![1.5; 24]).unwrap();
        let ok: SampleSet = serde_json::from_str(&text).unwrap();
        assert_eq!(ok.len(), 24);
        assert!(serde_json::from_str::<SampleSet>("[1.0, 2.0]").is_err());
    }
}
