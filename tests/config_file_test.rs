//! Tests for loading and saving configuration files

use facial_event_detection::{
    config::{Config, EXAMPLE_CONFIG},
    detector::ExpressionDetector,
};
use std::io::Write;

#[test]
fn test_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detection.yaml");

    let mut config = Config::default();
    config.detection.blink_delta = 0.045;
    config.detection.cooldown = 12;
    config.calibration.frames_target = 90;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_example_config_file_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE_CONFIG.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config, Config::default());
    assert!(ExpressionDetector::from_config(&config).is_ok());
}

#[test]
fn test_loaded_config_drives_detector() {
    let config = Config::from_yaml("calibration:\n  frames_target: 5\ndetection:\n  min_on: 1\n").unwrap();
    let detector = ExpressionDetector::from_config(&config).unwrap();
    assert_eq!(detector.calibration().frames_target, 5);
    assert_eq!(detector.config().min_on, 1);
    assert_eq!(detector.config().min_off, 2);
}

#[test]
fn test_invalid_values_rejected_by_detector() {
    let config = Config::from_yaml("detection:\n  blink_delta: -0.1\n").unwrap();
    assert!(config.validate().is_err());
    assert!(ExpressionDetector::from_config(&config).is_err());
}
