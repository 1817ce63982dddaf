pub mod config;
pub mod preset;
pub mod run;
pub mod simulate;
pub mod workout;

use circuitroom_core::{Config, PresetStore, Result, WorkoutConfiguration};

/// The current workout, or the preset named by `preset` (id or name).
pub fn resolve_workout(
    config: &Config,
    preset: Option<&str>,
) -> Result<WorkoutConfiguration> {
    match preset {
        Some(key) => Ok(PresetStore::open()?.find(key)?.config),
        None => Ok(config.workout.clone()),
    }
}
