//! Exit codes and messages for failing runs.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn roost(dir: &Path) -> assert_cmd::Command {
    let config = dir.join("roost-test.toml");
    fs::write(&config, "").unwrap();
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.current_dir(dir).arg("--config").arg(&config);
    cmd
}

#[test]
fn test_missing_answers_file() {
    let temp = TempDir::new().unwrap();
    roost(temp.path())
        .args(["new", "--answers", "absent.json"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_unknown_answer_key() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("answers.json"), r#"{ "colour": "green" }"#).unwrap();
    roost(temp.path())
        .args(["new", "--answers", "answers.json"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_port_in_answers() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("answers.json"),
        r#"{ "configMode": "Customize", "httpPort": "70000" }"#,
    )
    .unwrap();
    roost(temp.path())
        .args(["new", "--answers", "answers.json"])
        .assert()
        .failure()
        .code(2);
    assert!(!temp.path().join("my-roosevelt-sample-app").exists());
}

#[test]
fn test_no_answer_source_without_terminal() {
    let temp = TempDir::new().unwrap();
    roost(temp.path())
        .arg("new")
        .write_stdin("")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--standard-install"));
}

#[test]
fn test_standard_install_conflicts_with_answers() {
    let temp = TempDir::new().unwrap();
    roost(temp.path())
        .args(["new", "-s", "app", "--answers", "a.json"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_non_empty_destination_is_refused() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("taken");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "keep me").unwrap();

    roost(temp.path())
        .args(["new", "-s", "taken", "--skip-closing-message"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(existing.join("notes.txt")).unwrap(), "keep me");
    assert!(!existing.join("package.json").exists());
}

#[test]
fn test_force_writes_into_non_empty_destination() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("taken");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "keep me").unwrap();

    roost(temp.path())
        .args(["new", "-s", "taken", "--force", "--skip-closing-message"])
        .assert()
        .success();
    assert!(existing.join("package.json").is_file());
    assert!(existing.join("notes.txt").is_file());
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.current_dir(temp.path())
        .args(["--config", "nope.toml", "templates"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    roost(temp.path())
        .args(["config", "get", "defaults.nothing"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_unknown_subcommand() {
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.arg("frobnicate").assert().failure().code(2);
}
