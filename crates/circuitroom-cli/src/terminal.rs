//! Terminal rendering and the terminal bell cue player.

use std::io::Write;

use circuitroom_core::cues::{Cue, CuePlayer};
use circuitroom_core::timer::PhaseKind;
use circuitroom_core::{CueError, RunSnapshot, RunState};
use tracing::debug;

const BAR_WIDTH: usize = 20;

/// Rings the terminal bell on stderr. A run-complete cue rings once per tone.
pub struct TerminalCuePlayer {
    enabled: bool,
}

impl TerminalCuePlayer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl CuePlayer for TerminalCuePlayer {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        if !self.enabled {
            return Ok(());
        }
        let tones = cue.tones();
        debug!(?cue, tones = tones.len(), "ringing bell");
        let mut err = std::io::stderr().lock();
        for _ in &tones {
            err.write_all(b"\x07")?;
        }
        err.flush()?;
        Ok(())
    }
}

fn bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn tag(kind: PhaseKind) -> &'static str {
    match kind {
        PhaseKind::CircuitRest => "circuit rest",
        PhaseKind::Rest => "rest",
        PhaseKind::Run => "run",
        PhaseKind::Strength => "strength",
        PhaseKind::Work => "work",
    }
}

/// One status line per tick.
pub fn status_line(view: &RunSnapshot) -> String {
    let mut line = format!(
        "{:<24} {:>6} [{}] ({})",
        view.headline,
        view.clock,
        bar(view.phase_progress_pct),
        tag(view.phase_kind),
    );
    if let Some(n) = view.interval_number {
        line.push_str(&format!("  interval {}/{}", n, view.interval_count));
    }
    line.push_str(&format!(
        "  set {}/{}  circuit {}/{}  total {}/{} ({:.0}%)",
        view.position.current_set,
        view.sets,
        view.position.current_circuit,
        view.circuits,
        view.completed_sets,
        view.total_sets,
        view.overall_progress_pct,
    ));
    if view.state == RunState::Paused {
        line.push_str("  PAUSED");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuitroom_core::{RunController, WorkoutConfiguration};

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0), "-".repeat(BAR_WIDTH));
        assert_eq!(bar(100.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn status_line_shows_position() {
        let mut controller = RunController::new(WorkoutConfiguration::default());
        controller.start();
        controller.pause();
        let line = status_line(&controller.view());
        assert!(line.starts_with("RUN"));
        assert!(line.contains("2:00"));
        assert!(line.contains("interval 1/2"));
        assert!(line.contains("set 1/10"));
        assert!(line.contains("circuit 1/3"));
        assert!(line.contains("total 0/30 (0%)"));
        assert!(line.ends_with("PAUSED"));
    }

    #[test]
    fn disabled_player_is_silent() {
        assert!(TerminalCuePlayer::new(false).play(Cue::RunComplete).is_ok());
    }
}
