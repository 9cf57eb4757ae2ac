use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".tiledeck").join("config.json")
}

const BINARY_NAME: &str = "tiledeck";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"));
}

#[test]
/// Forget command should delete an existing config file.
fn forget_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    // Run the command
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("forget")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Saved panel configuration cleared"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
/// Forget with nothing saved should still succeed.
fn forget_without_config_succeeds() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("forget").env("HOME", tmp.path()).assert().success();
}

#[test]
/// Start without a device id or saved config should fail with guidance.
fn start_without_device_id_fails() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("start")
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("No device ID"));
}

#[test]
/// Preview with a missing layout file should fail and name the file.
fn preview_missing_file_fails() {
    let tmp = temp_config_dir();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("preview")
        .arg("--file")
        .arg(tmp.path().join("nope.json"))
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("nope.json"));
}
