//! Live run: a Tokio clock ticking the controller, stdin for controls.

use std::io::BufRead;

use circuitroom_core::{
    ClockDriver, Config, CuePlayer, Event, Result, RunController, Scheduler, TokioScheduler,
    WorkoutConfiguration,
};
use clap::Args;
use tokio::sync::mpsc;
use tracing::debug;

use crate::terminal::{status_line, TerminalCuePlayer};

#[derive(Args)]
pub struct RunArgs {
    /// Preset id or name to run instead of the current workout
    #[arg(long)]
    preset: Option<String>,
    /// Print JSON events and snapshots instead of status lines
    #[arg(long)]
    json: bool,
}

enum Command {
    TogglePause,
    Start,
    Reset,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "p" | "pause" | "resume" => Command::TogglePause,
        "s" | "start" => Command::Start,
        "r" | "reset" => Command::Reset,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

/// Forward stdin lines from a plain thread. A read parked there does not
/// hold up runtime shutdown once the session ends.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("stdin reader finished");
    });
    rx
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load()?;
    let preset = match args.preset.as_deref() {
        Some(key) => Some(super::resolve_workout(&config, Some(key))?),
        None => None,
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(config, preset, args.json))
}

async fn session(config: Config, preset: Option<WorkoutConfiguration>, json: bool) -> Result<()> {
    let controller =
        RunController::new(config.workout.clone()).with_countdown_from(config.cues.countdown_from);
    let mut driver = ClockDriver::new(
        controller,
        TokioScheduler::current()?,
        TerminalCuePlayer::new(config.cues.enabled),
    )
    .with_period(config.tick_period());

    if let Some(workout) = preset {
        print_event(driver.load_configuration(workout), json)?;
    }
    if !json {
        let summary = driver.controller().config().summary();
        println!(
            "{}: {} sets, about {} min",
            display_name(&driver.controller().config().name),
            summary.total_sets,
            summary.estimated_minutes()
        );
        eprintln!("controls: [enter/p] pause/resume  [r] reset  [s] start  [q] quit");
    }
    print_event(driver.start(), json)?;
    print_status(&driver, json)?;

    let mut input = spawn_stdin_reader();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            outcome = driver.next_tick() => {
                let Some(outcome) = outcome else { break };
                print_event(outcome.event, json)?;
                if outcome.completed {
                    if !json {
                        println!("Workout complete!");
                    }
                    break;
                }
                print_status(&driver, json)?;
            }
            line = input.recv(), if stdin_open => {
                let Some(line) = line else {
                    // Input closed; keep the clock going.
                    stdin_open = false;
                    continue;
                };
                let event = match parse_command(&line) {
                    Command::TogglePause => driver.toggle_pause(),
                    Command::Start => driver.start(),
                    Command::Reset => driver.reset(),
                    Command::Quit => break,
                    Command::Unknown => {
                        eprintln!("unknown command: {}", line.trim());
                        continue;
                    }
                };
                print_event(event, json)?;
                print_status(&driver, json)?;
            }
        }
    }

    driver.dispose();
    Ok(())
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "Untitled workout"
    } else {
        name
    }
}

fn print_event(event: Option<Event>, json: bool) -> Result<()> {
    let Some(event) = event else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string(&event)?);
        return Ok(());
    }
    match event {
        Event::PhaseAdvanced { interval_label, duration_secs, .. } => {
            println!("-> {interval_label} ({duration_secs}s)");
        }
        Event::RunReset { .. } => println!("reset; [s] to start again"),
        Event::ConfigurationLoaded { name, .. } => println!("loaded {}", display_name(&name)),
        _ => {}
    }
    Ok(())
}

fn print_status<S: Scheduler, P: CuePlayer>(driver: &ClockDriver<S, P>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&driver.controller().snapshot())?);
    } else {
        println!("{}", status_line(&driver.controller().view()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_controls() {
        assert!(matches!(parse_command(""), Command::TogglePause));
        assert!(matches!(parse_command(" P "), Command::TogglePause));
        assert!(matches!(parse_command("r"), Command::Reset));
        assert!(matches!(parse_command("start"), Command::Start));
        assert!(matches!(parse_command("q"), Command::Quit));
        assert!(matches!(parse_command("jump"), Command::Unknown));
    }
}
