//! Integration tests for the wslkit CLI surface.
//!
//! These tests verify help, version and argument validation. Nothing here
//! reaches PowerShell, `scp` or `sudo`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wslkit() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wslkit"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("CI");
    cmd.env_remove("WSLKIT_YES");
    cmd
}

/// `wslkit` pointed at an empty config in a temp dir.
fn isolated() -> (TempDir, Command) {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = wslkit();
    cmd.env("WSLKIT_CONFIG", dir.path().join("config.yaml"));
    (dir, cmd)
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    wslkit().assert().code(2).stderr(predicate::str::contains(
        "Bridge utilities for a Windows + WSL development box",
    ));
}

#[test]
fn test_cli_help_lists_every_command() {
    let output = wslkit().arg("--help").output().expect("run wslkit");
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "exec", "transfer", "windows", "ssh", "config", "version"] {
        assert!(help.contains(command), "missing `{command}` in help:\n{help}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    wslkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_human() {
    wslkit()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("wslkit {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_version_command_json_is_valid() {
    let output = wslkit()
        .args(["version", "--json"])
        .output()
        .expect("run wslkit");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    assert!(value["build_date"].is_string());
}

#[test]
fn test_unknown_command_fails() {
    wslkit()
        .arg("teleport")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_transfer_help_prints_tips() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["transfer", "help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HELP & TIPS"))
        .stdout(predicate::str::contains("Path Expansion:"));
}

#[test]
fn test_transfer_help_flag_still_shows_usage() {
    wslkit()
        .args(["transfer", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("upload"));
}

// --- Argument validation ---

#[test]
fn test_windows_action_requires_index() {
    wslkit()
        .args(["windows", "close"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<INDEX>"));
}

#[test]
fn test_transfer_rejects_out_of_range_port() {
    wslkit()
        .args(["transfer", "upload", "--port", "70000"])
        .assert()
        .code(2);
}

#[test]
fn test_run_dir_conflicts_with_project() {
    wslkit()
        .args(["run", "--project", "api", "--dir", "/tmp", "ls"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

// --- Non-interactive mode never prompts ---

#[test]
fn test_transfer_without_action_fails_with_yes() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--yes", "transfer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("choose `download` or `upload`"));
}

#[test]
fn test_ssh_without_action_fails_with_yes() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["ssh", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--auto"));
}

#[test]
fn test_ssh_install_needs_user_when_non_interactive() {
    let (_dir, mut cmd) = isolated();
    cmd.env("WSLKIT_YES", "1")
        .env_remove("WSLKIT_SSH_PASSWORD")
        .args(["ssh", "install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user is required"));
}

#[test]
fn test_run_without_target_fails_with_yes() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["run", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project or --dir is required"));
}

#[test]
fn test_run_unknown_project_is_an_error() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["run", "--project", "nope", "--yes", "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_exec_without_dir_fails_with_yes() {
    let (_dir, mut cmd) = isolated();
    cmd.env("CI", "true")
        .arg("exec")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dir is required"));
}

#[test]
fn test_corrupt_config_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "ssh: [not, a, map]\n").expect("write config");
    wslkit()
        .env("WSLKIT_CONFIG", &path)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_json_mode_reports_errors_as_json() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["config", "set", "nope.key", "x", "--json"])
        .output()
        .expect("run wslkit");
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "command_failed");
    assert!(value["message"].as_str().unwrap_or_default().contains("nope.key"));
}
