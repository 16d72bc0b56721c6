//! Config round trips through the binary

use assert_cmd::Command;
use predicates::prelude::*;

fn hold_notice(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("hold-notice").unwrap();
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("HOLD_NOTICE_DIR")
        .env_remove("HOLD_NOTICE_CONFIG");
    cmd
}

#[test]
fn config_path_follows_override() {
    let home = tempfile::tempdir().unwrap();
    let custom = home.path().join("elsewhere.toml");

    hold_notice(home.path())
        .env("HOLD_NOTICE_CONFIG", &custom)
        .args(["config", "set", "notify", "true"])
        .assert()
        .success();
    assert!(custom.is_file());

    hold_notice(home.path())
        .env("HOLD_NOTICE_CONFIG", &custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elsewhere.toml"));
}

#[test]
fn init_creates_file_once() {
    let home = tempfile::tempdir().unwrap();

    hold_notice(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config file created"));
    assert!(home.path().join("hold-notice").join("config.toml").is_file());

    hold_notice(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn set_then_get() {
    let home = tempfile::tempdir().unwrap();

    hold_notice(home.path())
        .args(["config", "set", "call.reject_command", "phonectl reject"])
        .assert()
        .success();

    hold_notice(home.path())
        .args(["config", "get", "call.reject_command"])
        .assert()
        .success()
        .stdout(predicate::str::contains("phonectl reject"));
}

#[test]
fn set_rejects_invalid_boolean() {
    let home = tempfile::tempdir().unwrap();

    hold_notice(home.path())
        .args(["config", "set", "notify", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true").and(predicate::str::contains("false")));
}

#[test]
fn storage_dir_from_config_file() {
    let home = tempfile::tempdir().unwrap();
    let storage = home.path().join("clips");

    hold_notice(home.path())
        .args(["config", "set", "storage_dir"])
        .arg(&storage)
        .assert()
        .success();

    hold_notice(home.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(storage.to_string_lossy().as_ref()));
}

#[test]
fn env_storage_dir_overrides_config_file() {
    let home = tempfile::tempdir().unwrap();
    let from_env = home.path().join("from-env");

    hold_notice(home.path())
        .args(["config", "set", "storage_dir", "/from/file"])
        .assert()
        .success();

    hold_notice(home.path())
        .arg("info")
        .env("HOLD_NOTICE_DIR", &from_env)
        .assert()
        .success()
        .stdout(predicate::str::contains(from_env.to_string_lossy().as_ref()));
}

#[test]
fn accept_runs_configured_command() {
    let home = tempfile::tempdir().unwrap();
    let marker = home.path().join("accepted");

    hold_notice(home.path())
        .args(["config", "set", "call.accept_command"])
        .arg(format!("touch {}", marker.display()))
        .assert()
        .success();

    hold_notice(home.path())
        .args(["action", "accept_call"])
        .arg("--storage-dir")
        .arg(home.path().join("storage"))
        .assert()
        .success();

    // The command runs detached; give it a moment to land
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while !marker.exists() && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    assert!(marker.exists());
}
