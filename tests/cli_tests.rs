//! CLI integration tests using the REAL charmbundle binary

mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;

#[allow(deprecated)]
fn charmbundle_cmd() -> Command {
    let mut cmd = Command::cargo_bin("charmbundle").unwrap();
    cmd.env_remove("CHARMBUNDLE_CHARMS_DIR")
        .env_remove("CHARMBUNDLE_LOG");
    cmd
}

const VALID: &str = "applications:\n  wordpress:\n    charm: wordpress\n    num_units: 1\n  mysql:\n    charm: mysql\n    num_units: 1\nrelations:\n  - [wordpress, mysql]\n";

#[test]
fn test_help_output() {
    charmbundle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_output() {
    charmbundle_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("charmbundle"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_verify_valid_bundle() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file("bundle.yaml", VALID);
    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_verify_lists_every_defect() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file(
        "bundle.yaml",
        "machines:\n  bogus: {}\napplications:\n  web:\n    charm: web\n    num_units: 1\n    to: [new, new]\n",
    );
    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("3 defect(s)"))
        .stdout(predicate::str::contains("invalid machine id \"bogus\""))
        .stdout(predicate::str::contains("not referred to by a placement directive"))
        .stdout(predicate::str::contains("too many units specified"));
}

#[test]
fn test_verify_with_charms_dir() {
    let workspace = TestWorkspace::new();
    workspace.write_charm(
        "wordpress",
        "name: wordpress\nrequires:\n  db: mysql\n  cache: memcache\n",
    );
    workspace.write_charm("mysql", "name: mysql\nprovides:\n  db: mysql\n");
    let file = workspace.write_file("bundle.yaml", VALID);

    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .arg("--charms-dir")
        .arg(workspace.path.join("charms"))
        .assert()
        .success();

    let broken = workspace.write_file(
        "broken.yaml",
        &VALID.replace("[wordpress, mysql]", "[\"wordpress:cache\", mysql]"),
    );
    charmbundle_cmd()
        .arg("verify")
        .arg(&broken)
        .env("CHARMBUNDLE_CHARMS_DIR", workspace.path.join("charms"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("cannot be inferred"));
}

#[test]
fn test_verify_local_charm_paths() {
    let workspace = TestWorkspace::new();
    workspace.write_charm("mysql", "name: mysql\n");
    let file = workspace.write_file(
        "bundle.yaml",
        "applications:\n  mysql:\n    charm: ./charms/mysql\n    num_units: 1\n",
    );

    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("only accepted when verifying locally"));

    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .arg("--local")
        .assert()
        .success();
}

#[test]
fn test_verify_reports_warnings() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file(
        "bundle.yaml",
        "services:\n  web:\n    charm: web\n    num_units: 1\n",
    );
    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("deprecated \"services\" section"));
}

#[test]
fn test_verify_prints_each_warning_once() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file(
        "bundle.yaml",
        "services:\n  web:\n    charm: web\n    num_units: 1\n",
    );
    let assert = charmbundle_cmd().arg("verify").arg(&file).assert().success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert_eq!(
        stderr.matches("deprecated \"services\" section").count(),
        1,
        "{stderr}"
    );
}

#[test]
fn test_verify_missing_file() {
    charmbundle_cmd()
        .args(["verify", "/nonexistent/bundle.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_verify_parse_error() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file(
        "bundle.yaml",
        "applications: {a: {charm: a}}\nservices: {b: {charm: b}}\n",
    );
    charmbundle_cmd()
        .arg("verify")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_format_json() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file("bundle.yaml", VALID);
    charmbundle_cmd()
        .arg("format")
        .arg(&file)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"applications\""))
        .stdout(predicate::str::contains("\"wordpress\""));
}

#[test]
fn test_format_write_in_place() {
    let workspace = TestWorkspace::new();
    let file = workspace.write_file(
        "bundle.yaml",
        "services:\n  web:\n    charm: web\nrelations: []\n",
    );
    charmbundle_cmd()
        .arg("format")
        .arg(&file)
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = workspace.read_file("bundle.yaml");
    assert!(written.contains("applications:"));
    assert!(!written.contains("services:"));
    assert!(!written.contains("relations"));
}

#[test]
fn test_completions() {
    charmbundle_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("charmbundle"));
}
