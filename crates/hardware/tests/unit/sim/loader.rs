//! Loader Tests.
//!
//! Reads firmware images and configuration files from temporary directories.

use std::fs;

use housekeeping_core::boot::FlashImage;
use housekeeping_core::common::SimError;
use housekeeping_core::config::BootConfig;
use housekeeping_core::sim::loader::{check_image, load_config, load_firmware};
use tempfile::tempdir;

#[test]
fn firmware_is_loaded_byte_for_byte() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fw.bin");
    fs::write(&path, [0x11u8, 0x22, 0x33, 0x44]).unwrap();

    let image = load_firmware(&path).unwrap();
    assert_eq!(image.as_bytes(), &[0x11, 0x22, 0x33, 0x44]);
    assert_eq!(image.consumed(), 0);
}

#[test]
fn missing_firmware_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.bin");

    let err = load_firmware(&path).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
    assert!(err.to_string().contains("missing.bin"));
}

#[test]
fn config_file_is_parsed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fabric.json");
    fs::write(
        &path,
        r#"{ "arbiter": { "weights": [1, 3] }, "boot": { "total_words": 2 } }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.arbiter.weights, vec![1, 3]);
    assert_eq!(config.boot.total_words, 2);
    assert_eq!(config.memory.size_bytes, 4096);
}

#[test]
fn malformed_config_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ arbiter: ").unwrap();

    assert!(matches!(load_config(&path), Err(SimError::Parse(_))));
}

#[test]
fn image_length_check() {
    let boot = BootConfig {
        total_words: 2,
        boot_requester: 0,
    };
    assert!(!check_image(&FlashImage::new(vec![0; 7]), &boot));
    assert!(check_image(&FlashImage::new(vec![0; 8]), &boot));
    assert!(check_image(&FlashImage::new(vec![0; 9]), &boot));
}
