use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".school-admin").join("config.json")
}

const BINARY_NAME: &str = "school-admin";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("school administration dashboard"))
        .stdout(contains("students"));
}

#[test]
/// Logout command should delete an existing config file.
fn logout_deletes_config_file() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, r#"{"last_email":"admin@school.com"}"#).unwrap();

    assert!(config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .env("HOME", tmp.path()) // simulate different $HOME
        .env_remove("SCHOOL_ADMIN_ENVIRONMENT")
        .assert()
        .success()
        .stdout(contains("Logging out"));

    assert!(!config_path.exists());
}

#[test]
/// Logout without a config file is not an error.
fn logout_without_config_succeeds() {
    let tmp = temp_home();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .env("HOME", tmp.path())
        .env_remove("SCHOOL_ADMIN_ENVIRONMENT")
        .assert()
        .success();
}

#[test]
fn unknown_environment_is_rejected() {
    let tmp = temp_home();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["--environment", "staging", "login", "--email", "a@b.c"])
        .env("HOME", tmp.path())
        .env("SCHOOL_ADMIN_PASSWORD", "pw")
        .assert()
        .failure()
        .stderr(contains("Unknown environment"));
}

#[test]
/// A broken saved environment must not stop logout from clearing it.
fn logout_clears_config_with_bad_environment() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, r#"{"environment":"not-a-url"}"#).unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .env("HOME", tmp.path())
        .env("SCHOOL_ADMIN_ENVIRONMENT", "also-bad")
        .assert()
        .success();

    assert!(!config_path.exists());
}

#[test]
fn login_rejects_unknown_role() {
    let tmp = temp_home();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["login", "--email", "a@b.c", "--role", "janitor"])
        .env("HOME", tmp.path())
        .env("SCHOOL_ADMIN_PASSWORD", "pw")
        .assert()
        .failure()
        .stderr(contains("janitor"));
}

#[test]
/// An unreachable backend yields the generic network message and a failure exit.
fn login_against_unreachable_backend_fails() {
    let tmp = temp_home();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args([
        "--base-url",
        "http://127.0.0.1:9",
        "login",
        "--email",
        "admin@school.com",
    ])
    .env("HOME", tmp.path())
    .env("SCHOOL_ADMIN_PASSWORD", "pw")
    .assert()
    .failure()
    .stderr(contains("Network error. Please try again."));

    assert!(!config_file_path(&tmp).exists());
}
