//! Integration tests for the `panelbridge` CLI binary.
//!
//! These tests validate argument parsing, help output, and error
//! handling — all without requiring a live panel.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `panelbridge` binary with env isolation.
///
/// Clears all `PANELBRIDGE_*` env vars and points config directories at
/// a nonexistent path so tests never touch the user's real configuration.
fn panelbridge_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("panelbridge");
    cmd.env("HOME", "/tmp/panelbridge-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/panelbridge-cli-test-nonexistent")
        .env_remove("PANELBRIDGE_PROFILE")
        .env_remove("PANELBRIDGE_HOST")
        .env_remove("PANELBRIDGE_PORT")
        .env_remove("PANELBRIDGE_TOKEN")
        .env_remove("PANELBRIDGE_OUTPUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = panelbridge_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    panelbridge_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("kiosk panel")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("tabs"))
            .and(predicate::str::contains("display")),
    );
}

#[test]
fn test_version_flag() {
    panelbridge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("panelbridge"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = panelbridge_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_status_without_config_fails() {
    panelbridge_cmd().arg("status").assert().failure().stderr(
        predicate::str::contains("No panel configured")
            .or(predicate::str::contains("profile"))
            .or(predicate::str::contains("config")),
    );
}

#[test]
fn test_unknown_profile_fails() {
    panelbridge_cmd()
        .args(["--profile", "missing", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_invalid_output_format() {
    let output = panelbridge_cmd()
        .args(["--output", "invalid", "status"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Profiles ────────────────────────────────────────────────────────

#[test]
fn test_profile_path_prints_a_path() {
    panelbridge_cmd()
        .args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_profile_pair_rejects_malformed_payload() {
    panelbridge_cmd()
        .args(["profile", "pair", "api_server=10.0.0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_port").or(predicate::str::contains("api_token")));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_display_subcommands_exist() {
    panelbridge_cmd()
        .args(["display", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("on")
                .and(predicate::str::contains("off"))
                .and(predicate::str::contains("brightness")),
        );
}

#[test]
fn test_tabs_subcommands_exist() {
    panelbridge_cmd()
        .args(["tabs", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("reload"))
                .and(predicate::str::contains("float")),
        );
}

#[test]
fn test_profile_subcommands_exist() {
    panelbridge_cmd()
        .args(["profile", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("pair")
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("path")),
        );
}
