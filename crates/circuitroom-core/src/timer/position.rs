use serde::{Deserialize, Serialize};

use crate::workout::NonEmptyIntervals;

/// Label shown while the between-circuits rest runs.
pub const CIRCUIT_REST_LABEL: &str = "Rest Between Circuits";

/// Where a run currently is. Advanced once per elapsed second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPosition {
    /// 1-based, in `[1, sets]`.
    pub current_set: u32,
    /// 1-based, in `[1, circuits]`.
    pub current_circuit: u32,
    /// Index into the resolved interval sequence.
    pub interval_idx: usize,
    /// Seconds left in the current phase.
    pub time_remaining: u32,
    pub interval_label: String,
    pub in_rest_between_circuits: bool,
}

impl RunPosition {
    /// Position at the start of a run: first interval of set 1, circuit 1.
    pub fn initial(intervals: &NonEmptyIntervals) -> Self {
        let first = intervals.first();
        Self {
            current_set: 1,
            current_circuit: 1,
            interval_idx: 0,
            time_remaining: first.duration,
            interval_label: first.label.clone(),
            in_rest_between_circuits: false,
        }
    }
}
