use std::sync::{Arc, Mutex};
use std::time::Duration;

use iotdash::dashboard::{EnergyChart, spawn_refresh};
use iotdash::scheduler::Schedule;
use iotdash::source::{FixedSource, RandomSource, SampleSource};
use iotdash::surface::{RecordingProvider, RecordingSurface};
use iotdash::viz::ChartConfig;
use iotdash::{ChartResult, SAMPLE_COUNT, SampleSet, SurfaceSize};

fn quick() -> Schedule {
    Schedule::every(Duration::from_millis(10)).with_initial_delay(Duration::ZERO)
}

#[test]
fn refresh_loop_draws_fresh_frames() {
    let chart = Arc::new(Mutex::new(EnergyChart::new(
        ChartConfig::default(),
        Box::new(RandomSource::seeded(11, 1.0, 4.0).unwrap()),
    )));
    let provider = Arc::new(Mutex::new(RecordingProvider::new(RecordingSurface::new(
        SurfaceSize::new(240.0, 100.0, 1.0),
    ))));

    let task = spawn_refresh(chart.clone(), provider.clone(), quick(), Some(3)).unwrap();
    assert_eq!(task.join().unwrap(), 3);

    let provider = provider.lock().unwrap();
    let surface = provider.surface.as_ref().unwrap();
    // only the last frame survives the full clear
    assert_eq!(surface.circles().count(), SAMPLE_COUNT);

    let chart = chart.lock().unwrap();
    let last = chart.last_samples().unwrap();
    // y = 100 - v / 4 * 100
    for (v, (center, _)) in last.iter().zip(surface.circles()) {
        assert!(((100.0 - center.y) / 25.0 - v).abs() < 1e-9);
    }
}

#[test]
fn detached_surface_does_not_stop_the_loop() {
    let set = SampleSet::new(vec![2.0; SAMPLE_COUNT]).unwrap();
    let chart = Arc::new(Mutex::new(EnergyChart::new(
        ChartConfig::default(),
        Box::new(FixedSource(set)),
    )));
    let provider = Arc::new(Mutex::new(RecordingProvider::detached()));

    let task = spawn_refresh(chart.clone(), provider, quick(), Some(4)).unwrap();
    assert_eq!(task.join().unwrap(), 4);
    assert!(chart.lock().unwrap().last_samples().is_some());
}

#[test]
fn cancelled_loop_stops_drawing() {
    let chart = Arc::new(Mutex::new(EnergyChart::new(
        ChartConfig::default(),
        Box::new(RandomSource::seeded(5, 1.0, 4.0).unwrap()),
    )));
    let provider = Arc::new(Mutex::new(RecordingProvider::new(RecordingSurface::new(
        SurfaceSize::default(),
    ))));
    let schedule = Schedule::every(Duration::from_secs(3600));
    let task = spawn_refresh(chart.clone(), provider.clone(), schedule, None).unwrap();
    assert!(!task.is_finished());
    assert_eq!(task.cancel().unwrap(), 0);

    assert!(chart.lock().unwrap().last_samples().is_none());
    let provider = provider.lock().unwrap();
    assert!(provider.surface.as_ref().unwrap().ops().is_empty());
}

struct BrokenSensor;

impl SampleSource for BrokenSensor {
    fn next_samples(&mut self) -> ChartResult<SampleSet> {
        panic!("sensor bus fault")
    }
}

#[test]
fn panicking_frame_fails_the_join() {
    let chart = Arc::new(Mutex::new(EnergyChart::new(
        ChartConfig::default(),
        Box::new(BrokenSensor),
    )));
    let provider = Arc::new(Mutex::new(RecordingProvider::new(RecordingSurface::new(
        SurfaceSize::default(),
    ))));
    let task = spawn_refresh(chart, provider, quick(), Some(2)).unwrap();
    assert!(task.join().is_err());
}
