//! Interval sequencing.
//!
//! [`next_position`] decides what follows a phase whose time just ran out;
//! [`step`] is the per-second decrement that calls it at phase boundaries.
//! Both are pure: callers own the position and act on the returned value.

use serde::{Deserialize, Serialize};

use super::position::{RunPosition, CIRCUIT_REST_LABEL};
use crate::cues::Cue;
use crate::workout::{NonEmptyIntervals, WorkoutConfiguration};

/// Which rollover produced a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    /// Rest between circuits ended; first interval of the next circuit.
    NextCircuit,
    /// Next interval of the same set.
    NextInterval,
    /// Sequence finished; first interval of the next set.
    NextSet,
    /// All sets of a non-final circuit finished.
    CircuitRest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced { position: RunPosition, kind: Advance },
    /// Schedule exhausted. The caller keeps its current position.
    Completed,
}

/// Compute the phase that follows `position`.
///
/// Called when `position.time_remaining` has just reached zero. `intervals`
/// must be the sequence resolved from `config`.
pub fn next_position(
    config: &WorkoutConfiguration,
    intervals: &NonEmptyIntervals,
    position: &RunPosition,
) -> Transition {
    if position.in_rest_between_circuits {
        if position.current_circuit < config.circuits {
            let first = intervals.first();
            return Transition::Advanced {
                position: RunPosition {
                    current_set: 1,
                    current_circuit: position.current_circuit + 1,
                    interval_idx: 0,
                    time_remaining: first.duration,
                    interval_label: first.label.clone(),
                    in_rest_between_circuits: false,
                },
                kind: Advance::NextCircuit,
            };
        }
        return Transition::Completed;
    }

    if position.interval_idx < intervals.last_index() {
        let idx = position.interval_idx + 1;
        // Guarded by the bound check above.
        let next = &intervals.as_slice()[idx];
        return Transition::Advanced {
            position: RunPosition {
                interval_idx: idx,
                time_remaining: next.duration,
                interval_label: next.label.clone(),
                ..position.clone()
            },
            kind: Advance::NextInterval,
        };
    }

    if position.current_set < config.sets {
        let first = intervals.first();
        return Transition::Advanced {
            position: RunPosition {
                current_set: position.current_set + 1,
                interval_idx: 0,
                time_remaining: first.duration,
                interval_label: first.label.clone(),
                ..position.clone()
            },
            kind: Advance::NextSet,
        };
    }

    if position.current_circuit < config.circuits {
        return Transition::Advanced {
            position: RunPosition {
                in_rest_between_circuits: true,
                time_remaining: config.rest_between_circuits,
                interval_label: CIRCUIT_REST_LABEL.to_string(),
                ..position.clone()
            },
            kind: Advance::CircuitRest,
        };
    }

    Transition::Completed
}

/// Result of one elapsed second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Still inside the phase. `cue` is set within the countdown window.
    Counted {
        position: RunPosition,
        cue: Option<Cue>,
    },
    /// Crossed into a new phase; fires [`Cue::PhaseComplete`].
    Advanced { position: RunPosition, kind: Advance },
    /// Crossed the final boundary; fires [`Cue::RunComplete`].
    Completed,
}

impl Step {
    /// The single cue this step emits, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Step::Counted { cue, .. } => *cue,
            Step::Advanced { .. } => Some(Cue::PhaseComplete),
            Step::Completed => Some(Cue::RunComplete),
        }
    }
}

/// Advance `position` by one second.
///
/// While time remains, only `time_remaining` changes and a countdown cue is
/// attached for the last `countdown_from` seconds. Reaching zero hands over
/// to [`next_position`].
pub fn step(
    config: &WorkoutConfiguration,
    intervals: &NonEmptyIntervals,
    position: &RunPosition,
    countdown_from: u32,
) -> Step {
    let remaining = position.time_remaining.saturating_sub(1);
    if remaining > 0 {
        let cue = (remaining <= countdown_from).then_some(Cue::CountdownTick);
        return Step::Counted {
            position: RunPosition {
                time_remaining: remaining,
                ..position.clone()
            },
            cue,
        };
    }
    match next_position(config, intervals, position) {
        Transition::Advanced { position, kind } => Step::Advanced { position, kind },
        Transition::Completed => Step::Completed,
    }
}
