//! Visualization: render the 24-hour energy chart onto any [`Surface`], or
//! straight to **SVG** / **PNG** files.
//!
//! - Background grid: one column per 4 hours, four value bands
//! - Connected line through all samples, filled circular marker per sample
//! - Every call is a full clear-and-redraw; nothing is carried between calls

pub mod layout;
pub mod style;
pub mod types;

pub use layout::{compute_layout, map_point};
pub use types::{ChartConfig, ChartLayout, DEFAULT_VALUE_RANGE_MAX, GridLine, ValueDomain};

use log::debug;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, ChartResult};
use crate::models::SurfaceSize;
use crate::surface::{Surface, SurfaceProvider};
use crate::viz_plotters_adapter::PlottersSurface;
use style::{ChartStyle, Rgb8};

/// Draws the gridded line-and-marker chart.
///
/// The renderer holds only configuration; `render` is a pure function of the
/// samples and the surface's current dimensions.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    config: ChartConfig,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Check configuration and samples without drawing anything.
    pub fn validate(&self, samples: &[f64]) -> ChartResult<()> {
        layout::validate_config(&self.config)?;
        layout::validate_samples(samples, &self.config)
    }

    /// Geometry of the frame `render` would draw for a surface of `size`.
    pub fn layout(&self, samples: &[f64], size: SurfaceSize) -> ChartResult<ChartLayout> {
        compute_layout(samples, size, &self.config)
    }

    /// Clear `surface` and draw the chart for `samples`.
    ///
    /// Inputs are validated before the first draw call, so an error leaves the
    /// previous frame untouched.
    pub fn render<S>(&self, samples: &[f64], surface: &mut S) -> ChartResult<ChartLayout>
    where
        S: Surface + ?Sized,
    {
        let layout = self.layout(samples, surface.logical_size())?;
        paint(&layout, &self.config.style, surface)?;
        debug!(
            "rendered {} samples on {}x{} @{}x",
            layout.points.len(),
            layout.size.width,
            layout.size.height,
            layout.size.pixel_ratio
        );
        Ok(layout)
    }
}

fn paint<S>(layout: &ChartLayout, style: &ChartStyle, surface: &mut S) -> ChartResult<()>
where
    S: Surface + ?Sized,
{
    let size = layout.size;
    surface.clear_rect(0.0, 0.0, size.width, size.height)?;

    surface.set_stroke(style.grid.color, style.grid.width);
    for line in layout.grid_lines() {
        surface.stroke_path(&[line.from, line.to])?;
    }

    surface.set_stroke(style.line.color, style.line.width);
    surface.stroke_path(&layout.points)?;

    surface.set_fill(style.marker_color);
    for p in &layout.points {
        surface.fill_circle(*p, style.marker_radius)?;
    }

    surface.present()
}

/// Hands out a plotters surface writing to a file on every acquisition:
/// SVG when the extension is `.svg`, otherwise a bitmap whose format follows
/// the extension (e.g. `.png`).
#[derive(Debug, Clone)]
pub struct FileSurfaceProvider {
    path: PathBuf,
    path_string: String,
    size: SurfaceSize,
    background: Rgb8,
}

impl FileSurfaceProvider {
    pub fn new<P: AsRef<Path>>(path: P, size: SurfaceSize, background: Rgb8) -> Self {
        let path = path.as_ref().to_path_buf();
        let path_string = path.to_string_lossy().into_owned();
        Self {
            path,
            path_string,
            size,
            background,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Viewport change: later acquisitions use the new logical size.
    pub fn set_size(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}

impl SurfaceProvider for FileSurfaceProvider {
    fn acquire(&mut self) -> ChartResult<Box<dyn Surface + '_>> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(ChartError::SurfaceUnavailable(format!(
                "output directory {} does not exist",
                parent.display()
            )));
        }
        let dims = self.size.pixel_dims()?;
        if self.path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root = SVGBackend::new(self.path_string.as_str(), dims).into_drawing_area();
            Ok(Box::new(PlottersSurface::new(root, self.size, self.background)))
        } else {
            let root = BitMapBackend::new(self.path_string.as_str(), dims).into_drawing_area();
            Ok(Box::new(PlottersSurface::new(root, self.size, self.background)))
        }
    }
}

/// Render one frame to `out_path` (see [`FileSurfaceProvider`] for formats).
///
/// Bad input is rejected before the output file is created.
pub fn render_to_file<P: AsRef<Path>>(
    samples: &[f64],
    out_path: P,
    size: SurfaceSize,
    config: &ChartConfig,
) -> ChartResult<ChartLayout> {
    let renderer = ChartRenderer::new(*config);
    renderer.layout(samples, size)?;

    let mut provider = FileSurfaceProvider::new(out_path, size, config.style.background);
    let mut surface = provider.acquire()?;
    renderer.render(samples, &mut *surface)
}

/// Render into an in-memory RGB buffer (`3 * w * h` bytes, row-major).
pub fn render_to_rgb_buffer(
    samples: &[f64],
    size: SurfaceSize,
    config: &ChartConfig,
) -> ChartResult<Vec<u8>> {
    let renderer = ChartRenderer::new(*config);
    renderer.layout(samples, size)?;

    let (w, h) = size.pixel_dims()?;
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        let mut surface = PlottersSurface::new(root, size, config.style.background);
        renderer.render(samples, &mut surface)?;
    }
    Ok(buf)
}
