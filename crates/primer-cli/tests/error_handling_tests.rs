//! Error reporting and exit codes of the `primer` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn primer(cwd: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("primer");
    cmd.env("XDG_CONFIG_HOME", cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(cwd);
    cmd
}

fn template_with_manifest(manifest: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("pythontemplate")).unwrap();
    fs::write(dir.path().join("pythontemplate/__init__.py"), "").unwrap();
    fs::write(dir.path().join("primer.toml"), manifest).unwrap();
    dir
}

#[test]
fn no_arguments_prints_help() {
    let cwd = TempDir::new().unwrap();
    primer(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let cwd = TempDir::new().unwrap();
    primer(cwd.path())
        .arg("bootstrap")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn library_and_application_conflict() {
    let cwd = TempDir::new().unwrap();
    primer(cwd.path())
        .args(["run", "--library", "--application"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn class_assignment_needs_equals() {
    let cwd = TempDir::new().unwrap();
    primer(cwd.path())
        .args(["run", "--class", "Widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected TOKEN=Name"));
}

#[test]
fn malformed_config_file_is_config_error() {
    let cwd = TempDir::new().unwrap();
    let path = cwd.path().join("bad.toml");
    fs::write(&path, "[git\ncommit = ").unwrap();

    primer(cwd.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_explicit_config_file_is_config_error() {
    let cwd = TempDir::new().unwrap();
    primer(cwd.path())
        .args(["--config", "nowhere.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn unknown_manifest_field_is_config_error() {
    let cwd = TempDir::new().unwrap();
    let tmpl = template_with_manifest("colour = \"blue\"\n");

    primer(cwd.path())
        .arg("run")
        .arg(tmpl.path())
        .args(["--author", "Jane", "--module", "myproj", "--library", "-y"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid manifest"));

    assert!(tmpl.path().join("pythontemplate").is_dir());
}

#[test]
fn missing_tool_without_installer_fails_before_changes() {
    let cwd = TempDir::new().unwrap();
    let tmpl = template_with_manifest(
        "[dependency_manager]\nprogram = \"primer-test-no-such-tool\"\n",
    );

    primer(cwd.path())
        .arg("run")
        .arg(tmpl.path())
        .args(["--author", "Jane", "--module", "myproj", "--library", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("is not installed"));

    assert!(tmpl.path().join("pythontemplate").is_dir());
    assert!(tmpl.path().join("primer.toml").exists());
}

#[test]
fn declining_confirmation_cancels() {
    let cwd = TempDir::new().unwrap();
    let tmpl = template_with_manifest("");

    primer(cwd.path())
        .arg("run")
        .arg(tmpl.path())
        .args(["--author", "Jane", "--module", "myproj", "--library"])
        .write_stdin("n\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Operation cancelled"));

    assert!(tmpl.path().join("pythontemplate").is_dir());
}

#[test]
fn verbose_errors_show_no_hint() {
    let cwd = TempDir::new().unwrap();
    primer(cwd.path())
        .args(["-v", "check", "class", "widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
