//! Saved preset commands.

use circuitroom_core::{Config, PresetStore, Result};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PresetAction {
    /// List saved presets
    List {
        #[arg(long)]
        json: bool,
    },
    /// Save the current workout as a preset
    Save {
        /// Name to save under (defaults to the current workout's name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a preset as JSON
    Show {
        /// Preset id or name
        key: String,
    },
    /// Make a preset the current workout
    Load {
        /// Preset id or name
        key: String,
    },
    /// Delete a preset
    Delete {
        /// Preset id
        id: i64,
    },
}

pub fn run(action: PresetAction) -> Result<()> {
    let store = PresetStore::open()?;

    match action {
        PresetAction::List { json } => {
            let presets = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else if presets.is_empty() {
                println!("No saved workouts. Use 'preset save --name <NAME>' to create one.");
            } else {
                for p in &presets {
                    let summary = p.config.summary();
                    println!(
                        "{}  {:<24} {} intervals, {} sets x {} circuits, {}s between circuits, ~{}m",
                        p.id,
                        p.config.name,
                        summary.intervals_per_set,
                        p.config.sets,
                        p.config.circuits,
                        p.config.rest_between_circuits,
                        summary.estimated_minutes(),
                    );
                }
            }
        }
        PresetAction::Save { name } => {
            let mut workout = Config::load()?.workout;
            if let Some(name) = name {
                workout.name = name;
            }
            let saved = store.save(&workout)?;
            println!("Workout saved successfully! (id {})", saved.id);
        }
        PresetAction::Show { key } => {
            let preset = store.find(&key)?;
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
        PresetAction::Load { key } => {
            let preset = store.find(&key)?;
            let mut config = Config::load()?;
            config.workout = preset.config;
            config.save()?;
            println!("loaded '{}' as the current workout", config.workout.name);
        }
        PresetAction::Delete { id } => {
            let removed = store.delete(id)?;
            println!("deleted '{}'", removed.config.name);
        }
    }
    Ok(())
}
