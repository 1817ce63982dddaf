use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Advance, RunSnapshot};

/// Every state change of a run produces an Event.
/// Front-ends render them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    RunStarted {
        interval_label: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    RunPaused {
        time_remaining: u32,
        at: DateTime<Utc>,
    },
    RunResumed {
        time_remaining: u32,
        at: DateTime<Utc>,
    },
    RunReset {
        at: DateTime<Utc>,
    },
    /// A phase boundary was crossed and another phase began.
    PhaseAdvanced {
        advance: Advance,
        current_set: u32,
        current_circuit: u32,
        interval_idx: usize,
        interval_label: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    RunCompleted {
        total_sets: u64,
        at: DateTime<Utc>,
    },
    /// A new workout replaced the current one and the run was reset.
    ConfigurationLoaded {
        name: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        #[serde(flatten)]
        snapshot: RunSnapshot,
        at: DateTime<Utc>,
    },
}
