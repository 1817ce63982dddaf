//! Current-workout editing commands.
//!
//! Numeric input is clamped into the editor bounds before it is stored.
//! Interval positions are 1-based on the command line.

use circuitroom_core::workout::{
    clamp_input, format_minutes_seconds, MoveDirection, CIRCUITS_RANGE, DURATION_RANGE,
    REST_BETWEEN_CIRCUITS_RANGE, SETS_RANGE,
};
use circuitroom_core::{resolve_intervals, Config, Result, ValidationError};
use clap::{Subcommand, ValueEnum};

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Print the current workout as JSON
    Show,
    /// Print totals and estimated duration
    Summary,
    /// Set the workout name
    SetName { name: String },
    /// Number of times the interval sequence repeats per circuit
    SetSets {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Number of circuits
    SetCircuits {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Rest between circuits in seconds
    SetRest {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Append an interval
    AddInterval {
        #[arg(long)]
        label: Option<String>,
        /// Duration in seconds
        #[arg(long, allow_hyphen_values = true)]
        duration: Option<i64>,
    },
    /// Remove the interval at a position
    RemoveInterval { position: usize },
    /// Move an interval up or down the sequence
    MoveInterval {
        position: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Change an interval's label and/or duration
    SetInterval {
        position: usize,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        duration: Option<i64>,
    },
}

fn index(position: usize) -> Result<usize, ValidationError> {
    position
        .checked_sub(1)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "position".into(),
            message: "positions start at 1".into(),
        })
}

pub fn run(action: WorkoutAction) -> Result<()> {
    let mut config = Config::load()?;
    let workout = &mut config.workout;

    match action {
        WorkoutAction::Show => {
            println!("{}", serde_json::to_string_pretty(&*workout)?);
            return Ok(());
        }
        WorkoutAction::Summary => {
            let summary = workout.summary();
            println!("Intervals per set:   {}", summary.intervals_per_set);
            println!("Total sets:          {}", summary.total_sets);
            println!(
                "Total interval time: {}",
                format_minutes_seconds(summary.total_interval_secs)
            );
            println!("Estimated duration:  {}m", summary.estimated_minutes());
            for (i, interval) in resolve_intervals(workout).iter().enumerate() {
                println!("  {}. {} ({}s)", i + 1, interval.label, interval.duration);
            }
            return Ok(());
        }
        WorkoutAction::SetName { name } => workout.name = name,
        WorkoutAction::SetSets { value } => workout.sets = clamp_input(value, &SETS_RANGE),
        WorkoutAction::SetCircuits { value } => {
            workout.circuits = clamp_input(value, &CIRCUITS_RANGE)
        }
        WorkoutAction::SetRest { value } => {
            workout.rest_between_circuits = clamp_input(value, &REST_BETWEEN_CIRCUITS_RANGE)
        }
        WorkoutAction::AddInterval { label, duration } => {
            workout.add_interval();
            let last = workout.intervals.len() - 1;
            workout.update_interval(
                last,
                label,
                duration.map(|d| clamp_input(d, &DURATION_RANGE)),
            )?;
        }
        WorkoutAction::RemoveInterval { position } => {
            let removed = workout.remove_interval(index(position)?)?;
            println!("removed {} ({}s)", removed.label, removed.duration);
        }
        WorkoutAction::MoveInterval {
            position,
            direction,
        } => {
            if !workout.move_interval(index(position)?, direction.into()) {
                println!("interval {position} cannot move further");
                return Ok(());
            }
        }
        WorkoutAction::SetInterval {
            position,
            label,
            duration,
        } => {
            workout.update_interval(
                index(position)?,
                label,
                duration.map(|d| clamp_input(d, &DURATION_RANGE)),
            )?;
        }
    }

    config.save()?;
    println!("workout updated");
    Ok(())
}
