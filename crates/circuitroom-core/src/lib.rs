//! # Circuitroom Core Library
//!
//! Core logic for the Circuitroom interval-workout timer. A workout is an
//! ordered list of labeled intervals repeated for a number of sets, with the
//! whole block repeated for a number of circuits and a rest inserted between
//! circuits. The CLI is a thin front-end over this crate.
//!
//! ## Architecture
//!
//! - **Workout**: configuration, interval-list derivation, editor operations
//! - **Timer**: the pure transition function, the run controller gating
//!   ticks, and a clock driver binding the controller to a scheduler
//! - **Cues**: which audio cue fires when, and the player collaborator
//! - **Storage**: TOML configuration and JSON preset records
//!
//! ## Key Components
//!
//! - [`next_position`]: phase sequencing
//! - [`RunController`]: start/pause/resume/reset state machine
//! - [`ClockDriver`]: one tick per elapsed second
//! - [`PresetStore`]: saved workouts

pub mod cues;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod workout;

pub use cues::{Cue, CuePlayer, SilentCuePlayer, Tone, Waveform};
pub use error::{ConfigError, CoreError, CueError, PresetError, Result, ValidationError};
pub use events::Event;
pub use storage::{Config, PresetStore, SavedPreset};
pub use timer::{
    next_position, Advance, ClockDriver, ManualScheduler, RunController, RunPosition,
    RunSnapshot, RunState, Scheduler, TickOutcome, TokioScheduler, Transition,
};
pub use workout::{resolve_intervals, Interval, NonEmptyIntervals, WorkoutConfiguration};
