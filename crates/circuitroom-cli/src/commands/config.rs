use circuitroom_core::{resolve_intervals, Config, Result};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "cues.enabled", "workout.restBetweenCircuits")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show the current workout, cue and clock settings
    List {
        /// Print the whole config as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset config to defaults
    Reset,
}

/// Section-by-section listing, keyed the way `config get` expects.
fn render_sections(config: &Config) -> String {
    let workout = &config.workout;
    let summary = workout.summary();
    let name = if workout.name.trim().is_empty() {
        "(unnamed)"
    } else {
        workout.name.as_str()
    };
    let intervals = resolve_intervals(workout)
        .iter()
        .map(|i| format!("{} {}s", i.label, i.duration))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str("[workout]\n");
    out.push_str(&format!("name = {name}\n"));
    out.push_str(&format!("intervals = {intervals}\n"));
    out.push_str(&format!("sets = {}\n", workout.sets));
    out.push_str(&format!("circuits = {}\n", workout.circuits));
    out.push_str(&format!(
        "restBetweenCircuits = {}\n",
        workout.rest_between_circuits
    ));
    out.push_str(&format!(
        "estimated = {}m ({} sets total)\n",
        summary.estimated_minutes(),
        summary.total_sets
    ));
    out.push_str("\n[cues]\n");
    out.push_str(&format!("enabled = {}\n", config.cues.enabled));
    out.push_str(&format!("countdown_from = {}\n", config.cues.countdown_from));
    out.push_str("\n[clock]\n");
    out.push_str(&format!("tick_ms = {}\n", config.clock.tick_ms));
    out
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", render_sections(&config));
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
