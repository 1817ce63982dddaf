mod config;
mod presets;

pub use config::{ClockConfig, Config, CuesConfig};
pub use presets::{PresetStore, SavedPreset};

use std::path::PathBuf;

/// Returns `~/.config/circuitroom[-dev]/` based on CIRCUITROOM_ENV.
///
/// Set CIRCUITROOM_ENV=dev to use development data directory.
/// CIRCUITROOM_DATA_DIR replaces the whole path.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("CIRCUITROOM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("CIRCUITROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("circuitroom-dev")
            } else {
                base_dir.join("circuitroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
