//! Audio cues and the collaborator that plays them.
//!
//! The core only decides which cue fires and when. How a cue sounds is
//! described by its tone recipe; synthesis and device handling belong to the
//! [`CuePlayer`] implementation.

use serde::{Deserialize, Serialize};

use crate::error::CueError;

/// Seconds-remaining window in which every tick emits a countdown cue.
pub const DEFAULT_COUNTDOWN_FROM: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Low-urgency beep for each of the last seconds of a phase.
    CountdownTick,
    /// A phase boundary was crossed and another phase follows.
    PhaseComplete,
    /// The whole schedule finished.
    RunComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
}

/// One oscillator burst with an exponential gain ramp to near silence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub gain: f32,
    pub duration_ms: u32,
    /// Delay from the start of the cue.
    pub offset_ms: u32,
}

impl Cue {
    pub fn tones(self) -> Vec<Tone> {
        match self {
            Cue::CountdownTick => vec![Tone {
                frequency_hz: 800.0,
                waveform: Waveform::Square,
                gain: 0.2,
                duration_ms: 150,
                offset_ms: 0,
            }],
            Cue::PhaseComplete => vec![Tone {
                frequency_hz: 1200.0,
                waveform: Waveform::Sine,
                gain: 0.4,
                duration_ms: 250,
                offset_ms: 0,
            }],
            // Three ascending beeps.
            Cue::RunComplete => (0..3u32)
                .map(|i| Tone {
                    frequency_hz: 600.0 + 200.0 * i as f32,
                    waveform: Waveform::Sine,
                    gain: 0.3,
                    duration_ms: 200,
                    offset_ms: 150 * i,
                })
                .collect(),
        }
    }

    /// Total length of the cue, including staggered tones.
    pub fn length_ms(self) -> u32 {
        self.tones()
            .iter()
            .map(|t| t.offset_ms + t.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

/// Plays cues. Implementations must return promptly; a failure is reported
/// to the caller, which logs it and keeps the clock running.
pub trait CuePlayer {
    fn play(&self, cue: Cue) -> Result<(), CueError>;
}

/// Player used when cues are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}
