//! Run controller.
//!
//! The controller owns the workout and the current [`RunPosition`] and
//! gates ticks on its state. It does not keep time itself: a clock driver
//! calls [`RunController::tick`] once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running | Paused -> Idle   (reset, or the schedule completing)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = RunController::new(workout);
//! controller.start();
//! // Once per second:
//! if let Some(outcome) = controller.tick() { /* play outcome.cue */ }
//! ```
//!
//! The workout must not change while a run is active; replace it with
//! [`RunController::load_configuration`], which resets the run.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::display::{total_sets, RunSnapshot};
use super::position::RunPosition;
use super::transition::{step, Step};
use crate::cues::{Cue, DEFAULT_COUNTDOWN_FROM};
use crate::events::Event;
use crate::workout::{resolve_intervals, NonEmptyIntervals, WorkoutConfiguration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// No run in progress; the workout may be edited.
    Idle,
    Running,
    Paused,
}

/// What one tick produced.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// At most one cue per tick.
    pub cue: Option<Cue>,
    /// Set when a phase boundary was crossed.
    pub event: Option<Event>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunController {
    config: WorkoutConfiguration,
    state: RunState,
    position: RunPosition,
    #[serde(default)]
    finished: bool,
    #[serde(default = "default_countdown_from")]
    countdown_from: u32,
}

fn default_countdown_from() -> u32 {
    DEFAULT_COUNTDOWN_FROM
}

impl RunController {
    /// Create an idle controller. The workout is coerced to valid minimums.
    pub fn new(config: WorkoutConfiguration) -> Self {
        let config = config.sanitized();
        let position = RunPosition::initial(&resolve_intervals(&config));
        Self {
            config,
            state: RunState::Idle,
            position,
            finished: false,
            countdown_from: DEFAULT_COUNTDOWN_FROM,
        }
    }

    /// Seconds-remaining window that emits countdown cues.
    pub fn with_countdown_from(mut self, seconds: u32) -> Self {
        self.countdown_from = seconds;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn position(&self) -> &RunPosition {
        &self.position
    }

    pub fn config(&self) -> &WorkoutConfiguration {
        &self.config
    }

    /// The interval sequence of the current workout, derived fresh.
    pub fn intervals(&self) -> NonEmptyIntervals {
        resolve_intervals(&self.config)
    }

    /// True after the schedule ran to completion, until the next start/reset.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn view(&self) -> RunSnapshot {
        RunSnapshot::build(
            self.state,
            self.finished,
            &self.config,
            &self.intervals(),
            &self.position,
        )
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.view(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a run from the first interval. Only valid while idle.
    pub fn start(&mut self) -> Option<Event> {
        if self.state != RunState::Idle {
            return None;
        }
        self.position = RunPosition::initial(&self.intervals());
        self.finished = false;
        self.state = RunState::Running;
        info!(workout = %self.config.name, "run started");
        Some(Event::RunStarted {
            interval_label: self.position.interval_label.clone(),
            duration_secs: self.position.time_remaining,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != RunState::Running {
            return None;
        }
        self.state = RunState::Paused;
        info!(time_remaining = self.position.time_remaining, "run paused");
        Some(Event::RunPaused {
            time_remaining: self.position.time_remaining,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != RunState::Paused {
            return None;
        }
        self.state = RunState::Running;
        info!(time_remaining = self.position.time_remaining, "run resumed");
        Some(Event::RunResumed {
            time_remaining: self.position.time_remaining,
            at: Utc::now(),
        })
    }

    /// Start when idle, otherwise flip between running and paused.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        match self.state {
            RunState::Idle => self.start(),
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
        }
    }

    /// Return to idle at the initial position. Valid from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = RunState::Idle;
        self.finished = false;
        self.position = RunPosition::initial(&self.intervals());
        info!("run reset");
        Some(Event::RunReset { at: Utc::now() })
    }

    /// Swap in a new workout and reset.
    pub fn load_configuration(&mut self, config: WorkoutConfiguration) -> Option<Event> {
        self.config = config.sanitized();
        self.reset();
        info!(workout = %self.config.name, "workout loaded");
        Some(Event::ConfigurationLoaded {
            name: self.config.name.clone(),
            at: Utc::now(),
        })
    }

    /// Apply one elapsed second. Returns `None` unless running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.state != RunState::Running {
            return None;
        }
        let intervals = self.intervals();
        let result = step(&self.config, &intervals, &self.position, self.countdown_from);
        let cue = result.cue();
        let outcome = match result {
            Step::Counted { position, .. } => {
                self.position = position;
                TickOutcome {
                    cue,
                    event: None,
                    completed: false,
                }
            }
            Step::Advanced { position, kind } => {
                debug!(
                    ?kind,
                    set = position.current_set,
                    circuit = position.current_circuit,
                    interval = position.interval_idx,
                    label = %position.interval_label,
                    "phase advanced"
                );
                self.position = position;
                TickOutcome {
                    cue,
                    event: Some(Event::PhaseAdvanced {
                        advance: kind,
                        current_set: self.position.current_set,
                        current_circuit: self.position.current_circuit,
                        interval_idx: self.position.interval_idx,
                        interval_label: self.position.interval_label.clone(),
                        duration_secs: self.position.time_remaining,
                        at: Utc::now(),
                    }),
                    completed: false,
                }
            }
            Step::Completed => {
                // Position stays on the last phase for display.
                self.state = RunState::Idle;
                self.finished = true;
                info!(workout = %self.config.name, "run complete");
                TickOutcome {
                    cue,
                    event: Some(Event::RunCompleted {
                        total_sets: total_sets(&self.config),
                        at: Utc::now(),
                    }),
                    completed: true,
                }
            }
        };
        Some(outcome)
    }
}
