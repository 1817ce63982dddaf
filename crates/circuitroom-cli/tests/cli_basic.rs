//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_circuitroom-cli"))
        .args(args)
        .env("CIRCUITROOM_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

/// Start `run` with stdin piped and left open.
fn spawn_run(data_dir: &Path) -> Child {
    Command::new(env!("CARGO_BIN_EXE_circuitroom-cli"))
        .arg("run")
        .env("CIRCUITROOM_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn run")
}

/// Poll until the child exits or `limit` passes; kills it on timeout.
fn wait_within(child: &mut Child, limit: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    let _ = child.kill();
    let _ = child.wait();
    None
}

/// One 5 s interval, one set, one circuit, cues off.
fn short_workout(data_dir: &Path, tick_ms: &str) {
    for args in [
        &["workout", "remove-interval", "2"][..],
        &["workout", "set-interval", "1", "--duration", "5"],
        &["workout", "set-sets", "1"],
        &["workout", "set-circuits", "1"],
        &["config", "set", "cues.enabled", "false"],
        &["config", "set", "clock.tick_ms", tick_ms],
    ] {
        assert_eq!(run_cli(data_dir, args).0, 0, "{args:?} failed");
    }
}

#[test]
fn test_run_exits_on_completion_with_stdin_open() {
    let dir = tempfile::tempdir().unwrap();
    short_workout(dir.path(), "20");

    let mut child = spawn_run(dir.path());
    let stdin = child.stdin.take();
    let status = wait_within(&mut child, Duration::from_secs(10));
    drop(stdin);
    let status = status.expect("run did not exit after the workout completed");
    assert!(status.success());
}

#[test]
fn test_run_quits_on_command() {
    let dir = tempfile::tempdir().unwrap();
    short_workout(dir.path(), "1000");

    let mut child = spawn_run(dir.path());
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"q\n").unwrap();
    stdin.flush().unwrap();
    let status = wait_within(&mut child, Duration::from_secs(3));
    drop(stdin);
    assert!(status.expect("run ignored quit").success());
}

#[test]
fn test_config_list_shows_sections() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[workout]"));
    assert!(stdout.contains("[cues]\nenabled = true\ncountdown_from = 5"));
    assert!(stdout.contains("[clock]\ntick_ms = 1000"));

    let (code, stdout, _) = run_cli(dir.path(), &["config", "list", "--json"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["workout"]["circuits"], 3);
}

#[test]
fn test_config_get_default() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "cues.countdown_from"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");
}

#[test]
fn test_config_set_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "workout.circuits", "4"]);
    assert_eq!(code, 0, "config set failed");
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "workout.circuits"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "4");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "cues.volume", "3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_workout_edits_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli(dir.path(), &["workout", "set-sets", "500"]).0, 0);
    assert_eq!(run_cli(dir.path(), &["workout", "set-rest", "-3"]).0, 0);
    let (code, stdout, _) = run_cli(dir.path(), &["workout", "show"]);
    assert_eq!(code, 0);
    let workout: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(workout["sets"], 50);
    assert_eq!(workout["restBetweenCircuits"], 0);
}

#[test]
fn test_workout_interval_editing() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        dir.path(),
        &["workout", "add-interval", "--label", "Row", "--duration", "30"],
    );
    assert_eq!(code, 0);
    assert_eq!(run_cli(dir.path(), &["workout", "move-interval", "3", "up"]).0, 0);
    assert_eq!(run_cli(dir.path(), &["workout", "remove-interval", "1"]).0, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["workout", "show"]);
    let workout: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let labels: Vec<&str> = workout["intervals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Row", "Strength"]);
}

#[test]
fn test_workout_last_interval_cannot_be_removed() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli(dir.path(), &["workout", "remove-interval", "1"]).0, 0);
    let (code, _, stderr) = run_cli(dir.path(), &["workout", "remove-interval", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_preset_save_blank_name_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["preset", "save"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a workout name to save"));

    let (code, stdout, _) = run_cli(dir.path(), &["preset", "list", "--json"]);
    assert_eq!(code, 0);
    let presets: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(presets.as_array().unwrap().is_empty());
}

#[test]
fn test_preset_save_list_load_delete() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_cli(dir.path(), &["workout", "set-circuits", "2"]).0, 0);
    let (code, stdout, _) = run_cli(dir.path(), &["preset", "save", "--name", "Legs"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Workout saved successfully!"));

    let (_, stdout, _) = run_cli(dir.path(), &["preset", "list", "--json"]);
    let presets: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let presets = presets.as_array().unwrap();
    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0]["name"], "Legs");
    let id = presets[0]["id"].as_i64().unwrap();

    assert_eq!(run_cli(dir.path(), &["workout", "set-circuits", "7"]).0, 0);
    assert_eq!(run_cli(dir.path(), &["preset", "load", "legs"]).0, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "workout.circuits"]);
    assert_eq!(stdout.trim(), "2");

    let id = id.to_string();
    assert_eq!(run_cli(dir.path(), &["preset", "delete", &id]).0, 0);
    let (code, _, _) = run_cli(dir.path(), &["preset", "show", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_simulate_json_total() {
    let dir = tempfile::tempdir().unwrap();
    for args in [
        &["workout", "set-sets", "1"][..],
        &["workout", "set-circuits", "2"],
        &["workout", "set-rest", "2"],
        &["workout", "set-interval", "1", "--duration", "5"],
        &["workout", "set-interval", "2", "--duration", "5"],
    ] {
        assert_eq!(run_cli(dir.path(), args).0, 0, "{args:?} failed");
    }

    let (code, stdout, _) = run_cli(dir.path(), &["simulate", "--json"]);
    assert_eq!(code, 0);
    let timeline: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(timeline["total_secs"], 22);
    assert_eq!(timeline["phases"].as_array().unwrap().len(), 5);
}
