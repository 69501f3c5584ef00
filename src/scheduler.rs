//! Recurring, cancellable tasks: the timer loop that drives periodic refreshes.

use log::{debug, info, warn};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// When a recurring task first fires and how often after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub initial_delay: Duration,
    pub interval: Duration,
}

impl Schedule {
    pub fn every(interval: Duration) -> Self {
        Self {
            initial_delay: interval,
            interval,
        }
    }

    pub fn with_initial_delay(self, initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            ..self
        }
    }
}

/// A tick closure running on its own thread until cancelled or it breaks.
///
/// Ticks of one task never overlap. Dropping the handle cancels the task and
/// waits for an in-flight tick to finish.
pub struct RecurringTask {
    name: String,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl RecurringTask {
    /// `tick` receives the 0-based tick number.
    pub fn spawn<F>(name: &str, schedule: Schedule, mut tick: F) -> std::io::Result<Self>
    where
        F: FnMut(u64) -> ControlFlow<()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let task_name = name.to_string();
        let handle = thread::Builder::new()
            .name(format!("recurring-{name}"))
            .spawn(move || {
                let mut wait = schedule.initial_delay;
                let mut ticks = 0u64;
                loop {
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // explicit stop, or the handle went away
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    let flow = tick(ticks);
                    ticks += 1;
                    if flow.is_break() {
                        debug!("task {task_name} finished after {ticks} ticks");
                        break;
                    }
                    wait = schedule.interval;
                }
                ticks
            })?;
        info!(
            "started task {name} (delay {:?}, every {:?})",
            schedule.initial_delay, schedule.interval
        );
        Ok(Self {
            name: name.to_string(),
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Stop the task and return how many ticks ran.
    ///
    /// Fails with the panic payload when a tick panicked.
    pub fn cancel(mut self) -> thread::Result<u64> {
        self.shutdown()
    }

    /// Wait for the task to stop on its own (its tick returned `Break`).
    /// Blocks forever if the tick never breaks.
    pub fn join(mut self) -> thread::Result<u64> {
        let ticks = self.handle.take().map_or(Ok(0), |h| h.join());
        self.stop = None;
        if ticks.is_err() {
            warn!("task {} panicked", self.name);
        }
        ticks
    }

    fn shutdown(&mut self) -> thread::Result<u64> {
        if let Some(stop) = self.stop.take() {
            // the worker may already have exited; that is fine
            let _ = stop.send(());
        }
        let ticks = self.handle.take().map_or(Ok(0), |h| h.join());
        match &ticks {
            Ok(n) => info!("stopped task {} after {} ticks", self.name, n),
            Err(_) => warn!("task {} panicked", self.name),
        }
        ticks
    }
}

impl Drop for RecurringTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.shutdown();
        }
    }
}
