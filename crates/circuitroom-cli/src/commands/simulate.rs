use circuitroom_core::timer::format_clock;
use circuitroom_core::workout::format_minutes_seconds;
use circuitroom_core::{
    ClockDriver, Config, Event, ManualScheduler, Result, RunController, RunPosition,
    SilentCuePlayer,
};
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct SimulateArgs {
    /// Preset id or name to simulate instead of the current workout
    #[arg(long)]
    preset: Option<String>,
    /// Print the timeline as JSON
    #[arg(long)]
    json: bool,
}

/// One phase of the simulated run.
#[derive(Debug, Serialize)]
struct PhaseEntry {
    starts_at_secs: u64,
    label: String,
    duration_secs: u32,
    set: u32,
    circuit: u32,
    circuit_rest: bool,
}

impl PhaseEntry {
    fn at(starts_at_secs: u64, position: &RunPosition) -> Self {
        Self {
            starts_at_secs,
            label: position.interval_label.clone(),
            duration_secs: position.time_remaining,
            set: position.current_set,
            circuit: position.current_circuit,
            circuit_rest: position.in_rest_between_circuits,
        }
    }
}

#[derive(Debug, Serialize)]
struct Timeline {
    phases: Vec<PhaseEntry>,
    total_secs: u64,
}

fn simulate(controller: RunController) -> Timeline {
    let mut driver = ClockDriver::new(controller, ManualScheduler::new(), SilentCuePlayer);
    driver.start();
    let mut phases = vec![PhaseEntry::at(0, driver.controller().position())];
    let mut elapsed = 0u64;
    while driver.is_clock_running() {
        for outcome in driver.advance(1) {
            elapsed += 1;
            if let Some(Event::PhaseAdvanced { .. }) = outcome.event {
                phases.push(PhaseEntry::at(elapsed, driver.controller().position()));
            }
        }
    }
    Timeline {
        phases,
        total_secs: elapsed,
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let config = Config::load()?;
    let workout = super::resolve_workout(&config, args.preset.as_deref())?;
    let timeline = simulate(RunController::new(workout));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }
    for phase in &timeline.phases {
        let start = u32::try_from(phase.starts_at_secs).unwrap_or(u32::MAX);
        println!(
            "{:>8}  circuit {} set {}  {:<24} {}s",
            format_clock(start),
            phase.circuit,
            phase.set,
            phase.label,
            phase.duration_secs,
        );
    }
    println!(
        "{} phases, total {}",
        timeline.phases.len(),
        format_minutes_seconds(timeline.total_secs)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuitroom_core::{Interval, WorkoutConfiguration};

    #[test]
    fn timeline_lists_every_phase_with_start_times() {
        let workout = WorkoutConfiguration {
            name: "sim".into(),
            intervals: vec![Interval::new("A", 1), Interval::new("B", 1)],
            sets: 1,
            circuits: 2,
            rest_between_circuits: 2,
            work_time: None,
            rest_between_sets: None,
        };
        let timeline = simulate(RunController::new(workout));
        let starts: Vec<u64> = timeline.phases.iter().map(|p| p.starts_at_secs).collect();
        assert_eq!(starts, vec![0, 1, 2, 4, 5]);
        assert!(timeline.phases[2].circuit_rest);
        assert_eq!(timeline.total_secs, 6);
    }
}
