//! Integration tests for the `roost` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command running in `dir` with an empty config file, so the user's own
/// settings never leak into a test.
fn roost(dir: &Path) -> assert_cmd::Command {
    let config = dir.join("roost-test.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn test_help_flag() {
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Roosevelt"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_command_help() {
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--standard-install"))
        .stdout(predicate::str::contains("--answers"))
        .stdout(predicate::str::contains("--install-deps"));
}

#[test]
fn test_standard_install_generates_app() {
    let temp = TempDir::new().unwrap();

    roost(temp.path())
        .args(["new", "--standard-install", "blog", "--skip-closing-message"])
        .assert()
        .success();

    let app = temp.path().join("blog");
    assert!(app.join("app.js").is_file());
    assert!(app.join("mvc").is_dir());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(app.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["rooseveltConfig"]["port"], 43711);
}

#[test]
fn test_closing_message_is_printed() {
    let temp = TempDir::new().unwrap();

    roost(temp.path())
        .args(["new", "-s", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has been generated"))
        .stdout(predicate::str::contains("npm run dev"))
        .stdout(predicate::str::contains("http://localhost:43711"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    roost(temp.path())
        .args(["new", "-s", "preview", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("package.json"));

    assert!(!temp.path().join("preview").exists());
}

#[test]
fn test_plan_prints_json() {
    let temp = TempDir::new().unwrap();

    let out = roost(temp.path())
        .args(["plan", "-s", "planned"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan["destination"], "planned");
    let operations = plan["operations"].as_array().unwrap();
    assert!(
        operations
            .iter()
            .any(|op| op["destination"] == "package.json")
    );
    assert!(!temp.path().join("planned").exists());
}

#[test]
fn test_answers_file_drives_generation() {
    let temp = TempDir::new().unwrap();
    let answers = temp.path().join("answers.json");
    fs::write(
        &answers,
        r#"{ "appName": "Answered App", "createDir": true, "dirname": "answered" }"#,
    )
    .unwrap();

    roost(temp.path())
        .args(["new", "--answers"])
        .arg(&answers)
        .arg("--skip-closing-message")
        .assert()
        .success();

    let manifest = fs::read_to_string(temp.path().join("answered/package.json")).unwrap();
    assert!(manifest.contains("answered-app"));
}

#[test]
fn test_templates_list() {
    let temp = TempDir::new().unwrap();

    roost(temp.path())
        .args(["templates", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_package.json"))
        .stdout(predicate::str::contains("app.js"));
}

#[test]
fn test_templates_json() {
    let temp = TempDir::new().unwrap();

    let out = roost(temp.path())
        .args(["templates", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let list: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(!list.as_array().unwrap().is_empty());
}

#[test]
fn test_config_get() {
    let temp = TempDir::new().unwrap();

    roost(temp.path())
        .args(["config", "get", "defaults.httpPort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("43711"));
}

#[test]
fn test_config_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("roost-test.toml"),
        "[defaults]\nversion = \"1.2.3\"\n",
    )
    .unwrap();

    roost(temp.path())
        .args(["config", "get", "defaults.version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.3"));
}

#[test]
fn test_init_writes_config() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("fresh.toml");

    let init = || {
        let mut cmd = cargo::cargo_bin_cmd!("roost");
        cmd.current_dir(temp.path()).arg("--config").arg(&target).arg("init");
        cmd
    };

    init().assert().success();
    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("[defaults]"));

    // A second run leaves the file alone.
    fs::write(&target, "# mine\n").unwrap();
    init()
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "# mine\n");
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo::cargo_bin_cmd!("roost");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roost"));
}
