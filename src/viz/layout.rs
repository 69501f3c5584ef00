//! Pure chart geometry: validation and the sample-to-pixel mapping.

use super::types::{ChartConfig, ChartLayout, GridLine, MAX_VALUE_BANDS};
use crate::error::{ChartError, ChartResult};
use crate::models::{Point, SAMPLE_COUNT, SurfaceSize, check_shape};

/// Map sample `index` with value `value` into logical surface coordinates.
///
/// X is anchored at both ends (index 0 at x = 0, the last index at x = width);
/// y is inverted so 0 sits on the bottom edge and `value_range_max` on the top.
/// The value is clamped into `[0, value_range_max]` first.
pub fn map_point(index: usize, value: f64, size: &SurfaceSize, value_range_max: f64) -> Point {
    let last = (SAMPLE_COUNT - 1) as f64;
    let x = (index as f64 / last) * size.width;
    let v = value.clamp(0.0, value_range_max);
    let y = size.height - (v / value_range_max) * size.height;
    Point::new(x, y)
}

pub fn validate_config(config: &ChartConfig) -> ChartResult<()> {
    if !(config.value_range_max.is_finite() && config.value_range_max > 0.0) {
        return Err(ChartError::InvalidInput(format!(
            "value range max must be a positive number, got {}",
            config.value_range_max
        )));
    }
    let d = config.domain;
    if !(d.min.is_finite() && d.max.is_finite()) || d.min > d.max {
        return Err(ChartError::InvalidInput(format!(
            "invalid value domain [{}, {}]",
            d.min, d.max
        )));
    }
    if !(1..=SAMPLE_COUNT as u32).contains(&config.hour_grid_step) {
        return Err(ChartError::InvalidInput(format!(
            "hour grid step must be within 1..={SAMPLE_COUNT}, got {}",
            config.hour_grid_step
        )));
    }
    if !(1..=MAX_VALUE_BANDS).contains(&config.value_bands) {
        return Err(ChartError::InvalidInput(format!(
            "value bands must be within 1..={MAX_VALUE_BANDS}, got {}",
            config.value_bands
        )));
    }
    Ok(())
}

/// Reject anything that would mis-plot: wrong count, NaN/inf, or out-of-domain values.
pub fn validate_samples(samples: &[f64], config: &ChartConfig) -> ChartResult<()> {
    check_shape(samples)?;
    let d = config.domain;
    if let Some((i, v)) = samples.iter().enumerate().find(|(_, v)| !d.contains(**v)) {
        return Err(ChartError::InvalidInput(format!(
            "sample {i} = {v} is outside the domain [{}, {}]",
            d.min, d.max
        )));
    }
    Ok(())
}

/// Validate inputs and compute every coordinate of the frame.
pub fn compute_layout(
    samples: &[f64],
    size: SurfaceSize,
    config: &ChartConfig,
) -> ChartResult<ChartLayout> {
    validate_config(config)?;
    validate_samples(samples, config)?;
    size.pixel_dims()?;

    let hours = SAMPLE_COUNT as u32;
    let vertical_grid = (0..=hours)
        .step_by(config.hour_grid_step as usize)
        .map(|h| {
            let x = (h as f64 / hours as f64) * size.width;
            GridLine {
                from: Point::new(x, 0.0),
                to: Point::new(x, size.height),
            }
        })
        .collect();

    let bands = config.value_bands;
    let horizontal_grid = (0..=bands)
        .map(|k| {
            let y = (k as f64 / bands as f64) * size.height;
            GridLine {
                from: Point::new(0.0, y),
                to: Point::new(size.width, y),
            }
        })
        .collect();

    let points = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| map_point(i, v, &size, config.value_range_max))
        .collect();

    Ok(ChartLayout {
        size,
        vertical_grid,
        horizontal_grid,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::types::ValueDomain;

    fn size(w: f64, h: f64) -> SurfaceSize {
        SurfaceSize::new(w, h, 1.0)
    }

    #[test]
    fn endpoints_are_anchored() {
        let s = size(240.0, 100.0);
        assert_eq!(map_point(0, 2.0, &s, 4.0).x, 0.0);
        assert!((map_point(23, 2.0, &s, 4.0).x - 240.0).abs() < 1e-9);
    }

    #[test]
    fn values_are_clamped_before_mapping() {
        let s = size(240.0, 100.0);
        assert_eq!(map_point(3, 9.0, &s, 4.0).y, 0.0);
        assert_eq!(map_point(3, -2.0, &s, 4.0).y, 100.0);
        assert_eq!(map_point(3, 4.0, &s, 4.0).y, 0.0);
        assert_eq!(map_point(3, 0.0, &s, 4.0).y, 100.0);
    }

    #[test]
    fn grid_has_hour_columns_and_value_bands() {
        let layout =
            compute_layout(&[1.0; 24], size(240.0, 100.0), &ChartConfig::default()).unwrap();
        let xs: Vec<f64> = layout.vertical_grid.iter().map(|l| l.from.x).collect();
        assert_eq!(xs, vec![0.0, 40.0, 80.0, 120.0, 160.0, 200.0, 240.0]);
        let ys: Vec<f64> = layout.horizontal_grid.iter().map(|l| l.from.y).collect();
        assert_eq!(ys, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(layout.grid_lines().count(), 12);
    }

    #[test]
    fn out_of_domain_is_invalid_input() {
        let mut v = vec![1.0; 24];
        v[10] = 4.5;
        let err = compute_layout(&v, size(240.0, 100.0), &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
        assert!(err.to_string().contains("sample 10"));
    }

    #[test]
    fn narrower_domain_is_enforced() {
        let config = ChartConfig {
            domain: ValueDomain::new(1.0, 4.0),
            ..ChartConfig::default()
        };
        assert!(compute_layout(&[0.5; 24], size(10.0, 10.0), &config).is_err());
        assert!(compute_layout(&[1.0; 24], size(10.0, 10.0), &config).is_ok());
    }

    #[test]
    fn bad_config_and_empty_surface_are_rejected() {
        let config = ChartConfig {
            value_range_max: 0.0,
            ..ChartConfig::default()
        };
        assert!(compute_layout(&[0.0; 24], size(10.0, 10.0), &config).is_err());

        let err = compute_layout(&[1.0; 24], size(0.0, 10.0), &ChartConfig::default()).unwrap_err();
        assert!(err.is_surface_unavailable());
    }

    #[test]
    fn grid_density_is_bounded() {
        let too_many_bands = ChartConfig {
            value_bands: u32::MAX,
            ..ChartConfig::default()
        };
        let err = compute_layout(&[1.0; 24], size(10.0, 10.0), &too_many_bands).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));

        let wide_step = ChartConfig {
            hour_grid_step: 25,
            ..ChartConfig::default()
        };
        assert!(validate_config(&wide_step).is_err());

        let finest = ChartConfig {
            hour_grid_step: 1,
            value_bands: MAX_VALUE_BANDS,
            ..ChartConfig::default()
        };
        let layout = compute_layout(&[1.0; 24], size(10.0, 10.0), &finest).unwrap();
        assert_eq!(layout.vertical_grid.len(), 25);
        assert_eq!(layout.horizontal_grid.len(), MAX_VALUE_BANDS as usize + 1);
    }

    #[test]
    fn oversized_surface_is_rejected_before_layout() {
        let err =
            compute_layout(&[1.0; 24], size(1e12, 1e12), &ChartConfig::default()).unwrap_err();
        assert!(err.is_surface_unavailable());
    }
}
