use serde::Serialize;

use super::{resolve_intervals, WorkoutConfiguration};

/// Totals shown next to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSummary {
    pub intervals_per_set: usize,
    pub total_sets: u64,
    /// Seconds spent in intervals across the whole run.
    pub total_interval_secs: u64,
    /// Interval time plus every rest between circuits, in seconds.
    pub estimated_secs: u64,
}

impl WorkoutSummary {
    pub fn for_config(config: &WorkoutConfiguration) -> Self {
        let intervals = resolve_intervals(config);
        let sets = u64::from(config.sets.max(1));
        let circuits = u64::from(config.circuits.max(1));
        let total_sets = sets * circuits;
        let total_interval_secs = intervals.total_duration() * total_sets;
        let estimated_secs =
            total_interval_secs + u64::from(config.rest_between_circuits) * (circuits - 1);
        Self {
            intervals_per_set: intervals.len(),
            total_sets,
            total_interval_secs,
            estimated_secs,
        }
    }

    /// Estimated duration in whole minutes, rounded down.
    pub fn estimated_minutes(&self) -> u64 {
        self.estimated_secs / 60
    }
}

/// `125` -> `"2m 5s"`.
pub fn format_minutes_seconds(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Interval;

    #[test]
    fn summary_of_default_workout() {
        let s = WorkoutConfiguration::default().summary();
        assert_eq!(s.intervals_per_set, 2);
        assert_eq!(s.total_sets, 30);
        assert_eq!(s.total_interval_secs, 165 * 30);
        assert_eq!(s.estimated_secs, 165 * 30 + 60 * 2);
        assert_eq!(s.estimated_minutes(), 84);
    }

    #[test]
    fn single_circuit_has_no_circuit_rest() {
        let cfg = WorkoutConfiguration {
            intervals: vec![Interval::new("A", 30)],
            sets: 2,
            circuits: 1,
            rest_between_circuits: 90,
            ..WorkoutConfiguration::default()
        };
        assert_eq!(cfg.summary().estimated_secs, 60);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_minutes_seconds(125), "2m 5s");
        assert_eq!(format_minutes_seconds(0), "0m 0s");
    }
}
