//! iotdash
//!
//! A small Rust library for the smart-home energy chart: 24 hourly power
//! samples drawn as a gridded line-and-marker chart on any drawing surface.
//! Pairs with the `iotdash` CLI.
//!
//! ### Features
//! - Stateless renderer over a canvas-like [`surface::Surface`] trait
//! - SVG/PNG output through plotters, or an in-memory RGB buffer
//! - Random, fixed and file-backed sample sources
//! - Cancellable recurring refresh task
//! - Simulated climate/energy readouts and quick summary statistics
//!
//! ### Example
//! ```no_run
//! use iotdash::source::{RandomSource, SampleSource};
//! use iotdash::{SurfaceSize, viz};
//!
//! let samples = RandomSource::default().next_samples()?;
//! viz::render_to_file(
//!     &samples,
//!     "energy.svg",
//!     SurfaceSize::new(600.0, 300.0, 2.0),
//!     &viz::ChartConfig::default(),
//! )?;
//! let stats = iotdash::stats::summarize(&samples);
//! println!("{:#?}", stats);
//! # Ok::<(), iotdash::ChartError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod readings;
pub mod scheduler;
pub mod source;
pub mod stats;
pub mod storage;
pub mod surface;
pub mod viz;
pub mod viz_plotters_adapter;

pub use error::{ChartError, ChartResult};
pub use models::{Point, SAMPLE_COUNT, SampleSet, SurfaceSize};
pub use viz::ChartRenderer;
