//! Core error types for circuitroom-core.
//!
//! The sequencing logic itself is closed-form arithmetic and has no failure
//! modes; errors come from the edges: reading/writing the config and preset
//! files, and rejecting input that cannot be coerced into a valid workout.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for circuitroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Preset storage errors
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Audio cue errors
    #[error("Cue error: {0}")]
    Cue(#[from] CueError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The live clock was started outside a Tokio runtime
    #[error("Clock runtime unavailable: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(#[source] std::io::Error),
}

/// Preset storage errors.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read/write presets file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse presets file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Preset '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Failed to access data directory: {0}")]
    DataDir(#[source] std::io::Error),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name missing or whitespace only
    #[error("Please enter a workout name to save")]
    EmptyName,

    /// An interval sequence must hold at least one interval
    #[error("Interval sequence is empty")]
    EmptyIntervals,

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// The last interval of a sequence cannot be removed
    #[error("Cannot remove the only remaining interval")]
    LastInterval,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Failure to emit an audio cue. Never fatal to the clock.
#[derive(Error, Debug)]
pub enum CueError {
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to write cue: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
