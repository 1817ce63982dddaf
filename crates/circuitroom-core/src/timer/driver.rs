//! Clock driver: binds a [`RunController`] to a [`Scheduler`].
//!
//! The scheduler callback only posts a tick onto a channel; the owner of the
//! driver applies queued ticks with [`ClockDriver::pump`] or awaits them with
//! [`ClockDriver::next_tick`]. All position changes therefore happen on the
//! owner's task, one tick at a time.
//!
//! The clock is scheduled exactly while the controller is running. A pause
//! first applies every tick that already arrived, then cancels the schedule,
//! so no elapsed second is lost or counted twice. Reset and reload discard
//! ticks still in flight.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use super::clock::{ClockHandle, ManualScheduler, Scheduler};
use super::engine::{RunController, RunState, TickOutcome};
use crate::cues::{Cue, CuePlayer};
use crate::events::Event;
use crate::workout::WorkoutConfiguration;

/// Length of one time unit.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

pub struct ClockDriver<S: Scheduler, P: CuePlayer> {
    controller: RunController,
    scheduler: S,
    player: P,
    period: Duration,
    clock: Option<ClockHandle>,
    tick_tx: mpsc::UnboundedSender<()>,
    tick_rx: mpsc::UnboundedReceiver<()>,
    /// Outcomes applied ahead of a pause, not yet handed to the owner.
    backlog: VecDeque<TickOutcome>,
}

impl<S: Scheduler, P: CuePlayer> ClockDriver<S, P> {
    pub fn new(controller: RunController, scheduler: S, player: P) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            scheduler,
            player,
            period: DEFAULT_TICK,
            clock: None,
            tick_tx,
            tick_rx,
            backlog: VecDeque::new(),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock
            .map(|h| self.scheduler.is_scheduled(h))
            .unwrap_or(false)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a run. Ignored unless the controller is idle.
    pub fn start(&mut self) -> Option<Event> {
        if self.controller.state() != RunState::Idle {
            return None;
        }
        self.stop_clock();
        let event = self.controller.start();
        self.sync_clock();
        event
    }

    pub fn toggle_pause(&mut self) -> Option<Event> {
        if self.controller.state() == RunState::Running {
            self.absorb_pending();
            if self.controller.state() != RunState::Running {
                // The queued ticks finished the run.
                return None;
            }
        }
        self.stop_clock();
        let event = self.controller.toggle_pause();
        self.sync_clock();
        event
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.stop_clock();
        self.backlog.clear();
        self.controller.reset()
    }

    pub fn load_configuration(&mut self, config: WorkoutConfiguration) -> Option<Event> {
        self.stop_clock();
        self.backlog.clear();
        self.controller.load_configuration(config)
    }

    /// Stop the clock for good.
    pub fn dispose(mut self) -> RunController {
        self.stop_clock();
        self.controller
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Apply every tick that has arrived so far.
    pub fn pump(&mut self) -> Vec<TickOutcome> {
        self.absorb_pending();
        self.backlog.drain(..).collect()
    }

    /// Wait for the next tick and apply it. Pends forever while the clock is
    /// stopped, so callers select it against their input source.
    pub async fn next_tick(&mut self) -> Option<TickOutcome> {
        if let Some(outcome) = self.backlog.pop_front() {
            return Some(outcome);
        }
        loop {
            self.tick_rx.recv().await?;
            if let Some(outcome) = self.apply_tick() {
                return Some(outcome);
            }
        }
    }

    fn absorb_pending(&mut self) {
        while self.tick_rx.try_recv().is_ok() {
            if let Some(outcome) = self.apply_tick() {
                self.backlog.push_back(outcome);
            }
        }
    }

    fn apply_tick(&mut self) -> Option<TickOutcome> {
        let outcome = self.controller.tick()?;
        if let Some(cue) = outcome.cue {
            self.emit(cue);
        }
        if outcome.completed {
            self.stop_clock();
        }
        Some(outcome)
    }

    fn emit(&self, cue: Cue) {
        if let Err(e) = self.player.play(cue) {
            warn!(?cue, error = %e, "failed to play cue");
        }
    }

    fn sync_clock(&mut self) {
        if self.controller.state() != RunState::Running {
            self.stop_clock();
            return;
        }
        if self.clock.is_none() {
            let tx = self.tick_tx.clone();
            let handle = self.scheduler.schedule_repeating(
                self.period,
                Box::new(move || {
                    let _ = tx.send(());
                }),
            );
            self.clock = Some(handle);
        }
    }

    fn stop_clock(&mut self) {
        if let Some(handle) = self.clock.take() {
            self.scheduler.cancel(handle);
        }
        while self.tick_rx.try_recv().is_ok() {}
    }
}

impl<P: CuePlayer> ClockDriver<ManualScheduler, P> {
    /// Let `ticks` seconds elapse, applying each one before the next fires.
    pub fn advance(&mut self, ticks: u32) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..ticks {
            self.scheduler.advance(1);
            outcomes.extend(self.pump());
        }
        outcomes
    }

    /// Tick until the run completes or stops being driven.
    pub fn run_to_completion(&mut self) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while self.is_clock_running() {
            outcomes.extend(self.advance(1));
        }
        outcomes
    }
}
