//! Integration tests for preset persistence feeding the run controller.

use circuitroom_core::{
    Config, Interval, PresetError, PresetStore, RunController, RunState, ValidationError,
    WorkoutConfiguration,
};

fn store_in(dir: &tempfile::TempDir) -> PresetStore {
    PresetStore::with_path(dir.path().join("presets.json"))
}

#[test]
fn loaded_preset_reproduces_fresh_start() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let workout = WorkoutConfiguration {
        name: "Track Tuesday".into(),
        intervals: vec![Interval::new("Run", 90), Interval::new("Walk", 30)],
        sets: 4,
        circuits: 2,
        rest_between_circuits: 120,
        work_time: None,
        rest_between_sets: None,
    };
    let saved = store.save(&workout).unwrap();

    let mut fresh = RunController::new(workout);
    fresh.start();

    let mut controller = RunController::new(WorkoutConfiguration::default());
    controller.start();
    controller.tick();
    controller.load_configuration(store.get(saved.id).unwrap().config);
    assert_eq!(controller.state(), RunState::Idle);
    assert_eq!(controller.position(), fresh.position());

    controller.start();
    assert_eq!(controller.position(), fresh.position());
}

#[test]
fn saved_preset_is_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let workout = WorkoutConfiguration {
        name: "Broken".into(),
        intervals: vec![Interval::new("Zero", 0)],
        sets: 0,
        circuits: 0,
        ..WorkoutConfiguration::default()
    };
    let saved = store.save(&workout).unwrap();
    assert_eq!(saved.config.sets, 1);
    assert_eq!(saved.config.circuits, 1);
    assert_eq!(saved.config.intervals[0].duration, 1);
}

#[test]
fn blank_name_is_rejected_and_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store
        .save(&WorkoutConfiguration {
            name: "Keep".into(),
            ..WorkoutConfiguration::default()
        })
        .unwrap();

    let err = store.save(&WorkoutConfiguration::default()).unwrap_err();
    assert!(matches!(err, PresetError::Invalid(ValidationError::EmptyName)));
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn config_file_carries_current_workout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::load_from(&path).unwrap();
    config.workout = WorkoutConfiguration {
        name: "Saved Current".into(),
        intervals: vec![Interval::new("Bike", 300)],
        sets: 2,
        circuits: 1,
        rest_between_circuits: 0,
        work_time: None,
        rest_between_sets: None,
    };
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.workout, config.workout);
}
