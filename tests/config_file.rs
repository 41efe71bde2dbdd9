//! Config file loading and saving.

use std::fs;

use swirlfx::{AppConfig, ConfigError, Params, Rgba, Style};
use tempfile::tempdir;

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("swirl.json");

    let config = AppConfig {
        params: Params { spin: -45.0, history: 0.97, birth_rate: 12.0, ..Params::default() },
        style: Style { particle_scale: 3.0, fade_color: Rgba::BLACK, background: Rgba::BLACK },
        width: 640,
        height: 480,
        seed: Some(1234),
    };
    config.save(&path).unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_clamps_out_of_range_knobs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wild.json");
    fs::write(
        &path,
        r#"{ "params": { "friction": 4.0, "birth_rate": 500.0, "rotate": -9000.0 } }"#,
    )
    .unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded.params.friction, 0.3);
    assert_eq!(loaded.params.birth_rate, 30.0);
    assert_eq!(loaded.params.rotate, -360.0);
    assert_eq!(loaded.params.lifetime, Params::default().lifetime);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = AppConfig::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ params: ").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_snapshot_writes_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("frame.png");

    let mut sim = swirlfx::Simulation::new(AppConfig {
        width: 32,
        height: 24,
        seed: Some(3),
        ..AppConfig::default()
    });
    sim.frame(0.05);
    sim.buffer().save_png(&path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (32, 24));
}
