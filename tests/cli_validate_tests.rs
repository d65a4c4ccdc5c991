//! End-to-end tests for `playbill validate` command.
#![cfg(feature = "web")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

mod fixtures;
use fixtures::*;

/// Path to the playbill binary
fn playbill_bin() -> &'static str {
    env!("CARGO_BIN_EXE_playbill")
}

/// Runs `playbill validate` on `content` with an empty config file, so the
/// platform config of the machine running the tests is never read.
fn run_validate(content: &Path) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("config.toml");
    fs::write(&config_path, "").expect("write config.toml");

    Command::new(playbill_bin())
        .args([
            "validate",
            "--content",
            content.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_validate_valid_content() {
    let temp_dir = TempDir::new().unwrap();
    write_content(temp_dir.path());

    let output = run_validate(temp_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "Valid content should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓"), "Output should indicate success");
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_validate_duplicate_show_id() {
    let temp_dir = TempDir::new().unwrap();
    write_content(temp_dir.path());

    let mut shows = test_shows(2);
    shows.push(shows[0].clone());
    let file = toml::to_string(&playbill::services::ShowsFile { shows }).unwrap();
    fs::write(temp_dir.path().join("shows.toml"), file).unwrap();

    let output = run_validate(temp_dir.path());

    assert_eq!(output.status.code(), Some(1), "Duplicate IDs should exit with code 1");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✗"), "Output should indicate failure");
    assert!(stderr.contains("1 problem(s)"));
    assert!(
        stderr.contains("used more than once"),
        "Should name the duplicate. stderr: {stderr}"
    );
    assert!(stderr.contains("show-0"));
}

#[test]
fn test_validate_missing_gallery_is_fine() {
    let temp_dir = TempDir::new().unwrap();
    write_content(temp_dir.path());
    fs::remove_file(temp_dir.path().join("gallery.toml")).unwrap();

    let output = run_validate(temp_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "Missing gallery should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_validate_missing_shows_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_validate(temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("shows.toml"), "stderr: {stderr}");
}

#[test]
fn test_validate_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    write_content(temp_dir.path());
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[campaign]\npage_url = \"https://:::\"\n").unwrap();

    let output = Command::new(playbill_bin())
        .args([
            "validate",
            "--content",
            temp_dir.path().to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("campaign.page_url"), "stderr: {stderr}");
    assert!(stderr.contains("--help"));
}
