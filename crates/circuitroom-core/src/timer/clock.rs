//! Repeating-tick schedulers.
//!
//! A [`Scheduler`] invokes a callback once per period until the returned
//! handle is cancelled. Cancelling is idempotent; unknown or already
//! cancelled handles are ignored.

use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Identifies one repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockHandle(u64);

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler {
    /// Invoke `callback` every `period`, first after one full period.
    fn schedule_repeating(&mut self, period: Duration, callback: TickCallback) -> ClockHandle;

    /// Stop the schedule behind `handle`. Safe to call more than once.
    fn cancel(&mut self, handle: ClockHandle);

    fn is_scheduled(&self, handle: ClockHandle) -> bool;
}

/// Scheduler driven by the Tokio timer. One task per schedule.
pub struct TokioScheduler {
    runtime: Handle,
    next_id: u64,
    tasks: HashMap<ClockHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Bind to the runtime the caller is running in.
    pub fn current() -> Result<Self, TryCurrentError> {
        Ok(Self::with_handle(Handle::try_current()?))
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, period: Duration, mut callback: TickCallback) -> ClockHandle {
        let handle = ClockHandle(self.next_id);
        self.next_id += 1;
        let task = self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            // A stalled runtime delays later ticks instead of bursting them.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: ClockHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }

    fn is_scheduled(&self, handle: ClockHandle) -> bool {
        self.tasks.contains_key(&handle)
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Scheduler advanced by hand. Used for simulation and tests.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: u64,
    entries: Vec<(ClockHandle, TickCallback)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live schedule `periods` times.
    pub fn advance(&mut self, periods: u32) {
        for _ in 0..periods {
            for (_, callback) in self.entries.iter_mut() {
                callback();
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, _period: Duration, callback: TickCallback) -> ClockHandle {
        let handle = ClockHandle(self.next_id);
        self.next_id += 1;
        self.entries.push((handle, callback));
        handle
    }

    fn cancel(&mut self, handle: ClockHandle) {
        self.entries.retain(|(h, _)| *h != handle);
    }

    fn is_scheduled(&self, handle: ClockHandle) -> bool {
        self.entries.iter().any(|(h, _)| *h == handle)
    }
}
