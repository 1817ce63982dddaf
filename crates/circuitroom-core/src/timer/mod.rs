mod clock;
mod display;
mod driver;
mod engine;
mod position;
mod transition;

pub use clock::{ClockHandle, ManualScheduler, Scheduler, TickCallback, TokioScheduler};
pub use display::{
    completed_sets, format_clock, phase_progress_pct, phase_total, total_sets, PhaseKind,
    RunSnapshot,
};
pub use driver::{ClockDriver, DEFAULT_TICK};
pub use engine::{RunController, RunState, TickOutcome};
pub use position::{RunPosition, CIRCUIT_REST_LABEL};
pub use transition::{next_position, step, Advance, Step, Transition};
