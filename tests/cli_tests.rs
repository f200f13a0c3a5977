//! End-to-end checks of the `metron` binary that need no live server.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// Config pointing at a port nothing listens on.
fn unreachable_server() -> NamedTempFile {
    write_config("[api]\nbase_url = \"http://127.0.0.1:9\"\n")
}

fn metron() -> Command {
    let mut cmd = Command::cargo_bin("metron").expect("metron binary");
    cmd.env_remove("METRON_API_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_every_command() {
    metron()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("kill"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    metron()
        .arg("--config")
        .arg(&missing)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn invalid_config_is_reported() {
    let file = write_config("[poll]\ninterval_secs = 0\n");

    metron()
        .arg("--config")
        .arg(file.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_secs"));
}

#[test]
fn config_set_without_fields_fails_before_any_request() {
    let file = unreachable_server();

    metron()
        .arg("--config")
        .arg(file.path())
        .args(["config", "set"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Nothing to change"));
}

#[test]
fn kill_in_json_mode_requires_yes() {
    let file = unreachable_server();

    metron()
        .arg("--config")
        .arg(file.path())
        .args(["--json", "kill"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn start_against_unreachable_server_notifies_failure() {
    let file = unreachable_server();

    metron()
        .arg("--config")
        .arg(file.path())
        .args(["--no-color", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗ Failed to start bot"));
}

#[test]
fn status_against_unreachable_server_fails_quietly() {
    let file = unreachable_server();

    metron()
        .arg("--config")
        .arg(file.path())
        .args(["--no-color", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch bot status"))
        .stderr(predicate::str::contains("✗").not());
}

#[test]
fn kill_with_yes_skips_prompt() {
    let file = unreachable_server();

    metron()
        .arg("--config")
        .arg(file.path())
        .args(["--no-color", "kill", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Kill switch failed"));
}

#[test]
fn bad_api_url_in_environment_is_named() {
    let file = write_config("[poll]\ninterval_secs = 5\n");

    metron()
        .env("METRON_API_URL", "ftp://bot.internal")
        .arg("--config")
        .arg(file.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("METRON_API_URL"));
}
