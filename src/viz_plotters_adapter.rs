//! Adapter that lets the chart renderer draw through any plotters backend.
//!
//! Usage example:
//! ```no_run
//!     use plotters::prelude::*;
//!     use plotters_svg::SVGBackend;
//!     use iotdash::models::SurfaceSize;
//!     use iotdash::viz::{ChartRenderer, style::Rgb8};
//!     use iotdash::viz_plotters_adapter::PlottersSurface;
//!
//!     let size = SurfaceSize::new(600.0, 300.0, 2.0);
//!     let root = SVGBackend::new("energy.svg", size.pixel_dims()?).into_drawing_area();
//!     let mut surface = PlottersSurface::new(root, size, Rgb8::WHITE);
//!     ChartRenderer::default().render(&[2.0; 24], &mut surface)?;
//! # Ok::<(), iotdash::ChartError>(())
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{ChartError, ChartResult};
use crate::models::{Point, SurfaceSize};
use crate::surface::Surface;
use crate::viz::style::Rgb8;

pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Stroke style in device pixels; never thinner than one pixel.
pub fn line_style(color: Rgb8, logical_width: f64, pixel_ratio: f64) -> ShapeStyle {
    let px = (logical_width * pixel_ratio).round().max(1.0) as u32;
    rgb_color(color).stroke_width(px)
}

pub fn fill_style(color: Rgb8) -> ShapeStyle {
    rgb_color(color).filled()
}

fn backend_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Backend(format!("{e:?}"))
}

/// A [`Surface`] over a plotters drawing area sized in device pixels.
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    size: SurfaceSize,
    background: Rgb8,
    stroke: ShapeStyle,
    fill: ShapeStyle,
}

impl<DB: DrawingBackend> PlottersSurface<DB> {
    /// `area` should be `size.pixel_dims()` pixels large.
    pub fn new(area: DrawingArea<DB, Shift>, size: SurfaceSize, background: Rgb8) -> Self {
        Self {
            area,
            size,
            background,
            stroke: line_style(Rgb8::new(0, 0, 0), 1.0, size.pixel_ratio),
            fill: fill_style(Rgb8::new(0, 0, 0)),
        }
    }

    fn to_px(&self, p: Point) -> (i32, i32) {
        let r = self.size.pixel_ratio;
        ((p.x * r).round() as i32, (p.y * r).round() as i32)
    }
}

impl<DB: DrawingBackend> Surface for PlottersSurface<DB> {
    fn logical_size(&self) -> SurfaceSize {
        self.size
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let top_left = self.to_px(Point::new(x, y));
        let bottom_right = self.to_px(Point::new(x + width, y + height));
        self.area
            .draw(&Rectangle::new(
                [top_left, bottom_right],
                fill_style(self.background),
            ))
            .map_err(backend_err)
    }

    fn set_stroke(&mut self, color: Rgb8, width: f64) {
        self.stroke = line_style(color, width, self.size.pixel_ratio);
    }

    fn set_fill(&mut self, color: Rgb8) {
        self.fill = fill_style(color);
    }

    fn stroke_path(&mut self, points: &[Point]) -> ChartResult<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let coords: Vec<(i32, i32)> = points.iter().map(|p| self.to_px(*p)).collect();
        self.area
            .draw(&PathElement::new(coords, self.stroke))
            .map_err(backend_err)
    }

    fn fill_circle(&mut self, center: Point, radius: f64) -> ChartResult<()> {
        let c = self.to_px(center);
        let r = (radius * self.size.pixel_ratio).round().max(1.0) as i32;
        self.area
            .draw(&Circle::new(c, r, self.fill))
            .map_err(backend_err)
    }

    fn present(&mut self) -> ChartResult<()> {
        self.area.present().map_err(backend_err)
    }
}
