//! Read-only view of a run for progress rings, bars and status lines.

use serde::{Deserialize, Serialize};

use super::engine::RunState;
use super::position::RunPosition;
use crate::workout::{NonEmptyIntervals, WorkoutConfiguration};

/// Shown as the circuit-rest total when the configured rest is zero.
const FALLBACK_CIRCUIT_REST: u32 = 60;

/// Coarse classification of a phase, derived from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    CircuitRest,
    Rest,
    Run,
    Strength,
    Work,
}

impl PhaseKind {
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("rest") {
            PhaseKind::Rest
        } else if lower.contains("run") {
            PhaseKind::Run
        } else if ["strength", "lift", "push", "pull"]
            .iter()
            .any(|k| lower.contains(k))
        {
            PhaseKind::Strength
        } else {
            PhaseKind::Work
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub state: RunState,
    /// Set once the schedule ran to completion; cleared by start or reset.
    pub finished: bool,
    #[serde(flatten)]
    pub position: RunPosition,
    /// Full length of the current phase in seconds.
    pub phase_total: u32,
    /// 0.0 ..= 100.0 within the current phase.
    pub phase_progress_pct: f64,
    /// 1-based interval number; absent during circuit rest.
    pub interval_number: Option<usize>,
    pub interval_count: usize,
    pub sets: u32,
    pub circuits: u32,
    pub completed_sets: u64,
    pub total_sets: u64,
    pub overall_progress_pct: f64,
    pub phase_kind: PhaseKind,
    pub headline: String,
    pub clock: String,
}

impl RunSnapshot {
    pub fn build(
        state: RunState,
        finished: bool,
        config: &WorkoutConfiguration,
        intervals: &NonEmptyIntervals,
        position: &RunPosition,
    ) -> Self {
        let phase_total = phase_total(config, intervals, position);
        let total_sets = total_sets(config);
        let completed = completed_sets(config, position);
        let (phase_kind, headline) = if position.in_rest_between_circuits {
            (PhaseKind::CircuitRest, "REST BETWEEN CIRCUITS".to_string())
        } else {
            let label = intervals
                .get(position.interval_idx)
                .map(|i| i.label.as_str())
                .unwrap_or_default();
            let headline = if label.is_empty() {
                "INTERVAL".to_string()
            } else {
                label.to_uppercase()
            };
            (PhaseKind::classify(label), headline)
        };
        Self {
            state,
            finished,
            position: position.clone(),
            phase_total,
            phase_progress_pct: phase_progress_pct(phase_total, position.time_remaining),
            interval_number: (!position.in_rest_between_circuits)
                .then_some(position.interval_idx + 1),
            interval_count: intervals.len(),
            sets: config.sets,
            circuits: config.circuits,
            completed_sets: completed,
            total_sets,
            overall_progress_pct: completed as f64 / total_sets as f64 * 100.0,
            phase_kind,
            headline,
            clock: format_clock(position.time_remaining),
        }
    }
}

/// Length of the phase `position` is in.
pub fn phase_total(
    config: &WorkoutConfiguration,
    intervals: &NonEmptyIntervals,
    position: &RunPosition,
) -> u32 {
    if position.in_rest_between_circuits {
        if config.rest_between_circuits == 0 {
            FALLBACK_CIRCUIT_REST
        } else {
            config.rest_between_circuits
        }
    } else {
        intervals
            .get(position.interval_idx)
            .map(|i| i.duration)
            .unwrap_or(1)
    }
}

/// `(total - remaining) / total` as a percentage; 0 for a zero total.
pub fn phase_progress_pct(total: u32, remaining: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(total.saturating_sub(remaining)) / f64::from(total) * 100.0
}

/// `sets × circuits`, never below 1.
pub fn total_sets(config: &WorkoutConfiguration) -> u64 {
    u64::from(config.sets.max(1)) * u64::from(config.circuits.max(1))
}

/// Sets finished before the current one.
pub fn completed_sets(config: &WorkoutConfiguration, position: &RunPosition) -> u64 {
    u64::from(position.current_circuit.saturating_sub(1)) * u64::from(config.sets)
        + u64::from(position.current_set.saturating_sub(1))
}

/// `75` -> `"1:15"`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
