//! Persistence and configuration tests
//!
//! Tests for:
//! - Save name validation
//! - JsonFileStore load / save / list
//! - Intensity repair on load
//! - AutoSaver ordering and shutdown
//! - StoreyConfig parsing

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use storey::StoreyConfig;
use storey::errors::StoreyError;
use storey::persistence::*;
use storey::scene::*;

// ============================================================================
// Helper
// ============================================================================

fn sample_home() -> Home {
    let mut home = Home::with_ground_floor("Saved");
    let floor = &mut home.floors[0];
    floor.walls.push(Wall::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)));
    floor.lights.push(Light::new("Lamp", Point3::new(1.0, 2.0, 1.0)));
    floor.cubes.push(Cube::new(Point3::new(0.0, 0.5, 0.0), "#808080"));
    home
}

// ============================================================================
// Save Names
// ============================================================================

#[test]
fn save_names_get_json_extension() -> Result<()> {
    assert_eq!(save_file_name("house")?, "house.json");
    assert_eq!(save_file_name("house.json")?, "house.json");
    assert_eq!(save_file_name("  my house ")?, "my house.json");
    Ok(())
}

#[test]
fn save_names_cannot_escape_directory() {
    for bad in ["", "   ", ".json", "../up", "a/b", "a\\b", "..", "x..y"] {
        assert!(
            matches!(save_file_name(bad), Err(StoreyError::InvalidFilename(_))),
            "{bad:?} should be rejected"
        );
    }
}

// ============================================================================
// JsonFileStore
// ============================================================================

#[test]
fn store_creates_missing_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("nested").join("saves");
    let store = JsonFileStore::open(&root)?;
    assert!(root.is_dir());
    assert_eq!(store.root_path(), root.as_path());
    assert!(store.list_saves()?.is_empty());
    Ok(())
}

#[test]
fn saved_home_loads_back() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::open(dir.path())?;
    let home = sample_home();

    store.save_home("house", &home)?;
    assert!(dir.path().join("house.json").is_file());
    assert!(!dir.path().join("house.json.tmp").exists());

    // with or without the extension
    assert_eq!(store.load_home("house")?, home);
    assert_eq!(store.load_home("house.json")?, home);
    Ok(())
}

#[test]
fn saving_twice_overwrites() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::open(dir.path())?;
    let mut home = sample_home();
    store.save_home("house", &home)?;

    home.name = "Renamed".to_string();
    store.save_home("house", &home)?;
    assert_eq!(store.load_home("house")?.name, "Renamed");
    assert_eq!(store.list_saves()?, vec!["house.json".to_string()]);
    Ok(())
}

#[test]
fn missing_save_is_reported() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::open(dir.path())?;
    assert!(matches!(store.load_home("nothing"), Err(StoreyError::SaveNotFound(_))));
    assert!(matches!(store.load_home("../etc"), Err(StoreyError::InvalidFilename(_))));
    Ok(())
}

#[test]
fn corrupt_save_is_a_json_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::open(dir.path())?;
    std::fs::write(dir.path().join("broken.json"), "{ not json")?;
    assert!(matches!(store.load_home("broken"), Err(StoreyError::Json(_))));
    Ok(())
}

#[test]
fn list_only_returns_json_files_sorted() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::open(dir.path())?;
    let home = sample_home();
    for name in ["zeta", "alpha", "mid"] {
        store.save_home(name, &home)?;
    }
    std::fs::write(dir.path().join("notes.txt"), "ignore me")?;
    std::fs::create_dir(dir.path().join("folder.json"))?;

    assert_eq!(store.list_saves()?, vec!["alpha.json", "mid.json", "zeta.json"]);
    Ok(())
}

#[test]
fn load_repairs_bad_intensities() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::open(dir.path())?;
    let doc = r#"{
        "name": "Old",
        "floors": [{
            "level": 0,
            "lights": [
                { "position": {"x": 0, "y": 2, "z": 0}, "state": { "on": true, "intensity": null } },
                { "position": {"x": 1, "y": 2, "z": 0}, "state": { "on": true, "intensity": 0.25 } }
            ]
        }]
    }"#;
    std::fs::write(dir.path().join("old.json"), doc)?;

    let home = store.load_home("old")?;
    let values: Vec<f32> = home.floors[0]
        .lights
        .iter()
        .map(|l| l.state.stored_intensity())
        .collect();
    assert_eq!(values, vec![1.0, 0.25]);
    Ok(())
}

// ============================================================================
// AutoSaver
// ============================================================================

#[test]
fn autosaver_reports_in_submission_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(JsonFileStore::open(dir.path())?);
    let saver = AutoSaver::spawn(store.clone())?;

    let home = sample_home();
    saver.submit("first", home.clone(), SaveOrigin::Auto)?;
    saver.submit("second", home.clone(), SaveOrigin::Explicit)?;

    let first = saver.recv_timeout(Duration::from_secs(5)).expect("first outcome");
    let second = saver.recv_timeout(Duration::from_secs(5)).expect("second outcome");
    assert_eq!(first.filename, "first");
    assert_eq!(first.origin, SaveOrigin::Auto);
    assert!(first.result.is_ok());
    assert_eq!(second.filename, "second");
    assert_eq!(second.origin, SaveOrigin::Explicit);

    assert!(saver.drain().is_empty());
    assert_eq!(store.load_home("second")?, home);
    Ok(())
}

#[test]
fn autosaver_reports_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let saver = AutoSaver::spawn(Arc::new(JsonFileStore::open(dir.path())?))?;

    saver.submit("../outside", sample_home(), SaveOrigin::Explicit)?;
    let outcome = saver.recv_timeout(Duration::from_secs(5)).expect("outcome");
    assert!(matches!(outcome.result, Err(StoreyError::InvalidFilename(_))));
    Ok(())
}

#[test]
fn dropping_autosaver_finishes_queued_jobs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(JsonFileStore::open(dir.path())?);
    {
        let saver = AutoSaver::spawn(store.clone())?;
        for i in 0..5 {
            saver.submit(format!("snap-{i}"), sample_home(), SaveOrigin::Auto)?;
        }
    }
    assert_eq!(store.list_saves()?.len(), 5);
    Ok(())
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn empty_config_is_default() -> Result<()> {
    assert_eq!(StoreyConfig::from_json_str("{}")?, StoreyConfig::default());
    Ok(())
}

#[test]
fn partial_config_keeps_other_defaults() -> Result<()> {
    let config = StoreyConfig::from_json_str(
        r#"{
            "renderer": { "shadow_caster_cap": 4 },
            "editor": { "autosave": false },
            "showcase": { "floor_cycle_secs": 8.0, "poll_interval": 500 }
        }"#,
    )?;
    assert_eq!(config.renderer.shadow_caster_cap, 4);
    assert_eq!(config.renderer.shadow_map_size, 512);
    assert!(!config.editor.autosave);
    assert_eq!(config.editor.default_filename, "default.json");
    assert_eq!(config.showcase.floor_cycle_secs, 8.0);
    assert_eq!(config.showcase.poll_interval, Duration::from_millis(500));
    Ok(())
}

#[test]
fn config_file_loading() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storey.json");
    assert_eq!(StoreyConfig::load(&path)?, StoreyConfig::default());

    std::fs::write(&path, r#"{ "editor": { "default_filename": "home.json" } }"#)?;
    assert_eq!(StoreyConfig::load(&path)?.editor.default_filename, "home.json");

    std::fs::write(&path, "[1, 2")?;
    assert!(StoreyConfig::load(&path).is_err());
    Ok(())
}
