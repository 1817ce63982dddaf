//! Workout configuration: the schedule shape a run iterates over.
//!
//! A configuration is immutable for the duration of a run. Editing happens
//! while the controller is idle; the controller re-derives the interval
//! sequence from the configuration at every read site.

mod summary;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;

pub use summary::{format_minutes_seconds, WorkoutSummary};

/// Fallback duration of the synthesized "Work" interval.
pub const DEFAULT_WORK_TIME: u32 = 45;
/// Fallback duration of the synthesized "Rest" interval.
pub const DEFAULT_REST_BETWEEN_SETS: u32 = 15;
/// Duration given to an interval appended by the editor.
pub const NEW_INTERVAL_DURATION: u32 = 60;

/// Bounds the configuration editor accepts for user input.
pub const DURATION_RANGE: RangeInclusive<u32> = 5..=1800;
pub const SETS_RANGE: RangeInclusive<u32> = 1..=50;
pub const CIRCUITS_RANGE: RangeInclusive<u32> = 1..=20;
pub const REST_BETWEEN_CIRCUITS_RANGE: RangeInclusive<u32> = 0..=600;

/// One labeled timed step in the repeating sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    #[serde(default)]
    pub label: String,
    /// Duration in seconds.
    pub duration: u32,
}

impl Interval {
    pub fn new(label: impl Into<String>, duration: u32) -> Self {
        Self {
            label: label.into(),
            duration,
        }
    }
}

/// An interval sequence that is guaranteed to hold at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NonEmptyIntervals(Vec<Interval>);

impl NonEmptyIntervals {
    pub fn new(intervals: Vec<Interval>) -> Result<Self, ValidationError> {
        if intervals.is_empty() {
            return Err(ValidationError::EmptyIntervals);
        }
        Ok(Self(intervals))
    }

    pub fn first(&self) -> &Interval {
        &self.0[0]
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Index of the last interval in the sequence.
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    /// Sum of all interval durations in seconds.
    pub fn total_duration(&self) -> u64 {
        self.0.iter().map(|i| u64::from(i.duration)).sum()
    }
}

impl TryFrom<Vec<Interval>> for NonEmptyIntervals {
    type Error = ValidationError;

    fn try_from(intervals: Vec<Interval>) -> Result<Self, Self::Error> {
        Self::new(intervals)
    }
}

/// Direction for reordering an interval in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The full schedule shape.
///
/// Field names serialize in camelCase so preset records stay readable by
/// earlier versions of the app. `work_time` and `rest_between_sets` only
/// matter for records without an `intervals` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutConfiguration {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_count")]
    pub sets: u32,
    #[serde(default = "default_count")]
    pub circuits: u32,
    #[serde(default)]
    pub rest_between_circuits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_between_sets: Option<u32>,
    /// Kept last: TOML emits it as array-of-tables after the scalar fields.
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

fn default_count() -> u32 {
    1
}

impl Default for WorkoutConfiguration {
    fn default() -> Self {
        Self {
            name: String::new(),
            intervals: vec![Interval::new("Run", 120), Interval::new("Strength", 45)],
            sets: 10,
            circuits: 3,
            rest_between_circuits: 60,
            work_time: Some(DEFAULT_WORK_TIME),
            rest_between_sets: Some(DEFAULT_REST_BETWEEN_SETS),
        }
    }
}

/// Derive the interval sequence a run iterates over.
///
/// Returns the configured intervals when present. Records without an
/// interval list get a Work/Rest pair built from the legacy `work_time` and
/// `rest_between_sets` fields, a zero value counting as missing.
pub fn resolve_intervals(config: &WorkoutConfiguration) -> NonEmptyIntervals {
    if !config.intervals.is_empty() {
        return NonEmptyIntervals(config.intervals.clone());
    }
    let work = config
        .work_time
        .filter(|&t| t > 0)
        .unwrap_or(DEFAULT_WORK_TIME);
    let rest = config
        .rest_between_sets
        .filter(|&t| t > 0)
        .unwrap_or(DEFAULT_REST_BETWEEN_SETS);
    NonEmptyIntervals(vec![Interval::new("Work", work), Interval::new("Rest", rest)])
}

/// Clamp a raw editor value into `range`.
pub fn clamp_input(value: i64, range: &RangeInclusive<u32>) -> u32 {
    let lo = i64::from(*range.start());
    let hi = i64::from(*range.end());
    // Both bounds come from a u32 range.
    value.clamp(lo, hi) as u32
}

impl WorkoutConfiguration {
    /// Coerce every numeric field to the minimum the state machine expects:
    /// sets, circuits and interval durations at least 1.
    ///
    /// Rest between circuits is unsigned and needs no coercion.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if out.sets == 0 {
            warn!(field = "sets", "coerced 0 to 1");
            out.sets = 1;
        }
        if out.circuits == 0 {
            warn!(field = "circuits", "coerced 0 to 1");
            out.circuits = 1;
        }
        for (idx, interval) in out.intervals.iter_mut().enumerate() {
            if interval.duration == 0 {
                warn!(field = "duration", interval = idx, "coerced 0 to 1");
                interval.duration = 1;
            }
        }
        out
    }

    /// A preset must carry a non-blank name.
    pub fn validate_for_save(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    pub fn summary(&self) -> WorkoutSummary {
        WorkoutSummary::for_config(self)
    }

    /// Editable interval list. A legacy record is first materialized into
    /// its derived Work/Rest pair so edits start from what would have run.
    fn intervals_mut(&mut self) -> &mut Vec<Interval> {
        if self.intervals.is_empty() {
            self.intervals = resolve_intervals(self).0;
        }
        &mut self.intervals
    }

    /// Append an unnamed interval with the default duration.
    pub fn add_interval(&mut self) {
        self.intervals_mut()
            .push(Interval::new("", NEW_INTERVAL_DURATION));
    }

    /// Remove the interval at `index`. The last remaining interval stays.
    pub fn remove_interval(&mut self, index: usize) -> Result<Interval, ValidationError> {
        let intervals = self.intervals_mut();
        if index >= intervals.len() {
            return Err(out_of_bounds(index, intervals.len()));
        }
        if intervals.len() <= 1 {
            return Err(ValidationError::LastInterval);
        }
        Ok(intervals.remove(index))
    }

    /// Swap the interval at `index` with its neighbour. Returns `false` when
    /// the move would fall off either end.
    pub fn move_interval(&mut self, index: usize, direction: MoveDirection) -> bool {
        let intervals = self.intervals_mut();
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };
        match target {
            Some(t) if index < intervals.len() && t < intervals.len() => {
                intervals.swap(index, t);
                true
            }
            _ => false,
        }
    }

    /// Update the label and/or duration of the interval at `index`.
    pub fn update_interval(
        &mut self,
        index: usize,
        label: Option<String>,
        duration: Option<u32>,
    ) -> Result<(), ValidationError> {
        let intervals = self.intervals_mut();
        let len = intervals.len();
        let interval = intervals
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))?;
        if let Some(label) = label {
            interval.label = label;
        }
        if let Some(duration) = duration {
            interval.duration = duration;
        }
        Ok(())
    }
}

fn out_of_bounds(index: usize, len: usize) -> ValidationError {
    ValidationError::OutOfBounds {
        collection: "intervals".into(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(work: Option<u32>, rest: Option<u32>) -> WorkoutConfiguration {
        WorkoutConfiguration {
            intervals: Vec::new(),
            work_time: work,
            rest_between_sets: rest,
            ..WorkoutConfiguration::default()
        }
    }

    #[test]
    fn resolve_returns_configured_intervals() {
        let cfg = WorkoutConfiguration::default();
        let resolved = resolve_intervals(&cfg);
        assert_eq!(resolved.as_slice(), cfg.intervals.as_slice());
    }

    #[test]
    fn resolve_synthesizes_work_rest_pair() {
        let resolved = resolve_intervals(&legacy(Some(30), Some(10)));
        assert_eq!(
            resolved.as_slice(),
            &[Interval::new("Work", 30), Interval::new("Rest", 10)]
        );
    }

    #[test]
    fn resolve_defaults_missing_or_zero_legacy_fields() {
        let resolved = resolve_intervals(&legacy(None, Some(0)));
        assert_eq!(resolved.first().duration, DEFAULT_WORK_TIME);
        assert_eq!(resolved.get(1).unwrap().duration, DEFAULT_REST_BETWEEN_SETS);
    }

    #[test]
    fn non_empty_rejects_empty_vec() {
        assert_eq!(
            NonEmptyIntervals::new(Vec::new()),
            Err(ValidationError::EmptyIntervals)
        );
    }

    #[test]
    fn sanitized_coerces_zero_fields() {
        let cfg = WorkoutConfiguration {
            sets: 0,
            circuits: 0,
            intervals: vec![Interval::new("A", 0), Interval::new("B", 7)],
            ..WorkoutConfiguration::default()
        };
        let clean = cfg.sanitized();
        assert_eq!(clean.sets, 1);
        assert_eq!(clean.circuits, 1);
        assert_eq!(clean.intervals[0].duration, 1);
        assert_eq!(clean.intervals[1].duration, 7);
    }

    #[test]
    fn validate_for_save_rejects_blank_name() {
        let mut cfg = WorkoutConfiguration::default();
        cfg.name = "   ".into();
        assert_eq!(cfg.validate_for_save(), Err(ValidationError::EmptyName));
        cfg.name = "Leg Day".into();
        assert!(cfg.validate_for_save().is_ok());
    }

    #[test]
    fn remove_keeps_last_interval() {
        let mut cfg = WorkoutConfiguration::default();
        cfg.remove_interval(0).unwrap();
        assert_eq!(cfg.remove_interval(0), Err(ValidationError::LastInterval));
        assert_eq!(cfg.intervals.len(), 1);
    }

    #[test]
    fn move_interval_swaps_and_stops_at_edges() {
        let mut cfg = WorkoutConfiguration::default();
        assert!(!cfg.move_interval(0, MoveDirection::Up));
        assert!(cfg.move_interval(0, MoveDirection::Down));
        assert_eq!(cfg.intervals[0].label, "Strength");
        assert!(!cfg.move_interval(1, MoveDirection::Down));
    }

    #[test]
    fn editing_legacy_record_materializes_intervals() {
        let mut cfg = legacy(Some(20), Some(10));
        cfg.add_interval();
        assert_eq!(cfg.intervals.len(), 3);
        assert_eq!(cfg.intervals[0], Interval::new("Work", 20));
        assert_eq!(cfg.intervals[2], Interval::new("", NEW_INTERVAL_DURATION));
    }

    #[test]
    fn clamp_input_respects_editor_bounds() {
        assert_eq!(clamp_input(-3, &REST_BETWEEN_CIRCUITS_RANGE), 0);
        assert_eq!(clamp_input(2, &DURATION_RANGE), 5);
        assert_eq!(clamp_input(99, &SETS_RANGE), 50);
    }

    #[test]
    fn legacy_record_parses_camel_case_json() {
        let json = r#"{"name":"Old","workTime":40,"restBetweenSets":20,"restBetweenCircuits":60,"sets":4,"circuits":2}"#;
        let cfg: WorkoutConfiguration = serde_json::from_str(json).unwrap();
        assert!(cfg.intervals.is_empty());
        assert_eq!(cfg.rest_between_circuits, 60);
        assert_eq!(resolve_intervals(&cfg).first().duration, 40);
    }
}
