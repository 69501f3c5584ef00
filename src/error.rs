//! Error types for chart rendering.

use thiserror::Error;

/// Errors that can occur while producing a chart frame.
///
/// Every error is local to a single render call; nothing here is fatal to a
/// long-running refresh loop.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Sample sequence has the wrong length or a value outside the declared domain
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The drawing surface could not be acquired or has no usable area
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The underlying drawing backend failed
    #[error("drawing backend error: {0}")]
    Backend(String),

    /// A sample source could not produce a sample set
    #[error("sample source error: {0}")]
    Source(String),
}

impl ChartError {
    pub fn is_surface_unavailable(&self) -> bool {
        matches!(self, ChartError::SurfaceUnavailable(_))
    }
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
