//! Saved workout presets.
//!
//! Presets live in `presets.json` in the data directory as an array of
//! workout records, each carrying a numeric id (creation time in epoch
//! milliseconds).

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::data_dir;
use crate::error::PresetError;
use crate::workout::WorkoutConfiguration;

/// Preset file name inside the data directory.
const PRESETS_FILE: &str = "presets.json";

/// A named workout plus its unique id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPreset {
    pub id: i64,
    #[serde(flatten)]
    pub config: WorkoutConfiguration,
}

/// Storage for saved presets.
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Open the store in the data directory.
    pub fn open() -> Result<Self, PresetError> {
        let dir = data_dir().map_err(PresetError::DataDir)?;
        Ok(Self::with_path(dir.join(PRESETS_FILE)))
    }

    /// Create a store backed by an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All presets in creation order. A missing or empty file holds none.
    pub fn list(&self) -> Result<Vec<SavedPreset>, PresetError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PresetError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, id: i64) -> Result<SavedPreset, PresetError> {
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))
    }

    /// Look a preset up by id, falling back to a case-insensitive name match.
    pub fn find(&self, key: &str) -> Result<SavedPreset, PresetError> {
        let presets = self.list()?;
        let key = key.trim();
        if let Ok(id) = key.parse::<i64>() {
            if let Some(p) = presets.iter().find(|p| p.id == id) {
                return Ok(p.clone());
            }
        }
        presets
            .into_iter()
            .find(|p| p.config.name.trim().eq_ignore_ascii_case(key))
            .ok_or_else(|| PresetError::NotFound(key.to_string()))
    }

    /// Save `config` as a new preset.
    ///
    /// The name must not be blank. The stored copy is coerced to valid
    /// minimums and stamped with a fresh id.
    pub fn save(&self, config: &WorkoutConfiguration) -> Result<SavedPreset, PresetError> {
        config.validate_for_save()?;
        let mut presets = self.list()?;
        let newest = presets.iter().map(|p| p.id).max().unwrap_or(i64::MIN);
        let id = Utc::now().timestamp_millis().max(newest.saturating_add(1));
        let preset = SavedPreset {
            id,
            config: config.sanitized(),
        };
        presets.push(preset.clone());
        self.write_all(&presets)?;
        info!(id, name = %preset.config.name, "preset saved");
        Ok(preset)
    }

    /// Remove the preset with `id`, returning it.
    pub fn delete(&self, id: i64) -> Result<SavedPreset, PresetError> {
        let mut presets = self.list()?;
        let pos = presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))?;
        let removed = presets.remove(pos);
        self.write_all(&presets)?;
        info!(id, "preset deleted");
        Ok(removed)
    }

    fn write_all(&self, presets: &[SavedPreset]) -> Result<(), PresetError> {
        let content = serde_json::to_string_pretty(presets)?;
        std::fs::write(&self.path, content).map_err(|source| PresetError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
