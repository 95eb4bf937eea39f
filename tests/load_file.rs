//! Reading through the facade with persisted configuration

use std::fs;

use layerkit::{load_file, CancellationToken, Config, NoOpProgress};

#[test]
fn test_load_file_uses_saved_settings() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.machine.build_plate_width = 300.0;
    config.machine.build_plate_depth = 100.0;
    config.reader.extrusion_width = 0.6;
    let config_path = dir.path().join("layerkit.toml");
    config.save_to_file(&config_path).unwrap();
    let config = Config::load_from_file(&config_path).unwrap();

    let gcode_path = dir.path().join("cube.gcode");
    fs::write(&gcode_path, "G1 X0 Y0 Z0.2 E1\nG1 X10 Y0 E2\n").unwrap();

    let node = load_file(&gcode_path, &config, &NoOpProgress, &CancellationToken::new())
        .unwrap()
        .unwrap();

    assert_eq!(node.position().x, -150.0);
    assert_eq!(node.position().z, 50.0);
    let polygon = &node.layer_data().unwrap().layer(0).unwrap().polygons()[0];
    assert_eq!(polygon.line_widths(), &[0.6]);
}

#[test]
fn test_load_file_missing() {
    let err = load_file(
        "/does/not/exist.gcode",
        &Config::default(),
        &NoOpProgress,
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert!(err.is_reader_error());
}

#[test]
fn test_version_is_set() {
    assert!(!layerkit::VERSION.is_empty());
    assert!(!layerkit::BUILD_DATE.is_empty());
}
