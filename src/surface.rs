//! Drawing-surface abstraction (a canvas-like 2D context) and an in-memory
//! recording implementation.
//!
//! The renderer only talks to [`Surface`]; raster/SVG output lives in
//! [`crate::viz_plotters_adapter`].

use crate::error::{ChartError, ChartResult};
use crate::models::{Point, SurfaceSize};
use crate::viz::style::Rgb8;

/// A canvas-like drawing context measured in logical units.
///
/// Implementations scale logical coordinates by [`SurfaceSize::pixel_ratio`]
/// when rasterizing. Stroke and fill colors are sticky state, as on a canvas.
pub trait Surface {
    /// Current logical width/height and device pixel ratio.
    fn logical_size(&self) -> SurfaceSize;

    /// Erase a rectangle back to the surface background.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;

    fn set_stroke(&mut self, color: Rgb8, width: f64);

    fn set_fill(&mut self, color: Rgb8);

    /// Move to the first point, line to each following point, then stroke.
    fn stroke_path(&mut self, points: &[Point]) -> ChartResult<()>;

    fn fill_circle(&mut self, center: Point, radius: f64) -> ChartResult<()>;

    /// Flush buffered output, if the backend has any.
    fn present(&mut self) -> ChartResult<()> {
        Ok(())
    }
}

/// Hands out the drawing surface for one render call.
///
/// Acquisition happens on every render, so a provider can follow viewport
/// changes or report that the target has gone away.
pub trait SurfaceProvider {
    fn acquire(&mut self) -> ChartResult<Box<dyn Surface + '_>>;
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    SetStroke {
        color: Rgb8,
        width: f64,
    },
    SetFill(Rgb8),
    StrokePath(Vec<Point>),
    FillCircle {
        center: Point,
        radius: f64,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// A `ClearRect` covering the whole surface drops everything recorded before
/// it, so [`RecordingSurface::ops`] always describes the visible frame.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Simulate a viewport change.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// All stroked paths, in draw order.
    pub fn paths(&self) -> impl Iterator<Item = &[Point]> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::StrokePath(p) => Some(p.as_slice()),
            _ => None,
        })
    }

    /// All filled circle centers, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle { center, radius } => Some((*center, *radius)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn logical_size(&self) -> SurfaceSize {
        self.size
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let covers_all =
            x <= 0.0 && y <= 0.0 && x + width >= self.size.width && y + height >= self.size.height;
        if covers_all {
            self.ops.clear();
        }
        self.ops.push(DrawOp::ClearRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn set_stroke(&mut self, color: Rgb8, width: f64) {
        self.ops.push(DrawOp::SetStroke { color, width });
    }

    fn set_fill(&mut self, color: Rgb8) {
        self.ops.push(DrawOp::SetFill(color));
    }

    fn stroke_path(&mut self, points: &[Point]) -> ChartResult<()> {
        self.ops.push(DrawOp::StrokePath(points.to_vec()));
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> ChartResult<()> {
        self.ops.push(DrawOp::FillCircle { center, radius });
        Ok(())
    }
}

/// Provider that lends out a single [`RecordingSurface`], or reports it missing.
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    pub surface: Option<RecordingSurface>,
}

impl RecordingProvider {
    pub fn new(surface: RecordingSurface) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// A provider whose surface element does not exist.
    pub fn detached() -> Self {
        Self { surface: None }
    }
}

impl SurfaceProvider for RecordingProvider {
    fn acquire(&mut self) -> ChartResult<Box<dyn Surface + '_>> {
        match self.surface.as_mut() {
            Some(s) => Ok(Box::new(s)),
            None => Err(ChartError::SurfaceUnavailable(
                "no recording surface attached".into(),
            )),
        }
    }
}

// Lets a borrowed surface be boxed by providers without moving it.
impl<S: Surface + ?Sized> Surface for &mut S {
    fn logical_size(&self) -> SurfaceSize {
        (**self).logical_size()
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        (**self).clear_rect(x, y, width, height)
    }

    fn set_stroke(&mut self, color: Rgb8, width: f64) {
        (**self).set_stroke(color, width)
    }

    fn set_fill(&mut self, color: Rgb8) {
        (**self).set_fill(color)
    }

    fn stroke_path(&mut self, points: &[Point]) -> ChartResult<()> {
        (**self).stroke_path(points)
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> ChartResult<()> {
        (**self).fill_circle(center, radius)
    }

    fn present(&mut self) -> ChartResult<()> {
        (**self).present()
    }
}
