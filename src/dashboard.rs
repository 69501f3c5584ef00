//! The energy-chart widget: a sample source, a surface provider and the
//! renderer wired together, plus the refresh loop that keeps it current.

use log::{debug, warn};
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use crate::error::{ChartError, ChartResult};
use crate::models::SampleSet;
use crate::scheduler::{RecurringTask, Schedule};
use crate::source::SampleSource;
use crate::surface::SurfaceProvider;
use crate::viz::{ChartConfig, ChartLayout, ChartRenderer};

/// Energy chart controller.
///
/// Remembers the last sample set only so a resize can redraw the same data;
/// the renderer itself stays stateless.
pub struct EnergyChart {
    renderer: ChartRenderer,
    source: Box<dyn SampleSource>,
    last: Option<SampleSet>,
}

impl EnergyChart {
    pub fn new(config: ChartConfig, source: Box<dyn SampleSource>) -> Self {
        Self {
            renderer: ChartRenderer::new(config),
            source,
            last: None,
        }
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn last_samples(&self) -> Option<&SampleSet> {
        self.last.as_ref()
    }

    /// Fetch fresh samples and draw them.
    ///
    /// Returns `Ok(None)` when the surface cannot be acquired: the frame is
    /// skipped and the caller carries on.
    pub fn refresh(
        &mut self,
        provider: &mut dyn SurfaceProvider,
    ) -> ChartResult<Option<ChartLayout>> {
        let samples = self.source.next_samples()?;
        let drawn = self.draw(&samples, provider)?;
        self.last = Some(samples);
        Ok(drawn)
    }

    /// Redraw the current data after the surface changed size.
    pub fn redraw(
        &mut self,
        provider: &mut dyn SurfaceProvider,
    ) -> ChartResult<Option<ChartLayout>> {
        match self.last.take() {
            Some(samples) => {
                let drawn = self.draw(&samples, provider);
                self.last = Some(samples);
                drawn
            }
            None => self.refresh(provider),
        }
    }

    fn draw(
        &self,
        samples: &SampleSet,
        provider: &mut dyn SurfaceProvider,
    ) -> ChartResult<Option<ChartLayout>> {
        // validate before acquiring: file-backed surfaces write their file when dropped
        self.renderer.validate(samples)?;
        let mut surface = match provider.acquire() {
            Ok(s) => s,
            Err(ChartError::SurfaceUnavailable(why)) => {
                warn!("skipping frame, surface unavailable: {why}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        match self.renderer.render(samples, &mut *surface) {
            Ok(layout) => Ok(Some(layout)),
            Err(ChartError::SurfaceUnavailable(why)) => {
                warn!("skipping frame, surface unavailable: {why}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Refresh `chart` on `schedule` until `max_frames` frames were attempted
/// (or forever with `None`). Errors are logged and the loop keeps going.
pub fn spawn_refresh<P>(
    chart: Arc<Mutex<EnergyChart>>,
    provider: Arc<Mutex<P>>,
    schedule: Schedule,
    max_frames: Option<u64>,
) -> std::io::Result<RecurringTask>
where
    P: SurfaceProvider + Send + 'static,
{
    RecurringTask::spawn("energy-chart", schedule, move |tick| {
        let result = match (chart.lock(), provider.lock()) {
            (Ok(mut chart), Ok(mut provider)) => chart.refresh(&mut *provider),
            _ => {
                warn!("energy chart state poisoned, stopping refresh");
                return ControlFlow::Break(());
            }
        };
        match result {
            Ok(Some(_)) => debug!("frame {tick} drawn"),
            Ok(None) => debug!("frame {tick} skipped"),
            Err(e) => warn!("frame {tick} failed: {e}"),
        }
        match max_frames {
            Some(max) if tick + 1 >= max => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })
}
