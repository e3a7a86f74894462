//! CLI parsing tests for the holocron command
//!
//! These exercise argument parsing and the offline commands; nothing here
//! touches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the holocron binary
#[allow(deprecated)]
fn holocron() -> Command {
    Command::cargo_bin("holocron").expect("Failed to find holocron binary")
}

#[test]
fn test_help_shows_all_commands() {
    holocron()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gather"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_query_help_shows_working_filter_example() {
    // The documented example must survive the relaxed-quote parser: keys
    // need quotes, only single-vs-double is forgiven.
    holocron()
        .args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{'name': 'Sky'"));
}

#[test]
fn test_version_flag() {
    holocron()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("holocron"));
}

#[test]
fn test_global_options_in_help() {
    holocron()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--cache-dir"))
        .stdout(predicate::str::contains("--policy"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--quiet"));
}

#[test]
fn test_unknown_collection_fails_fast() {
    let temp = TempDir::new().unwrap();
    holocron()
        .args(["query", "wookiees"])
        .env("HOLOCRON_CACHE_DIR", temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown collection"));
}

#[test]
fn test_unknown_policy_rejected() {
    holocron()
        .args(["gather", "--policy", "eager"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown resolution policy"));
}

#[test]
fn test_status_on_empty_cache() {
    let temp = TempDir::new().unwrap();
    holocron()
        .arg("status")
        .env("HOLOCRON_CACHE_DIR", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not cached"));
}

#[test]
fn test_clean_with_yes_on_empty_cache() {
    let temp = TempDir::new().unwrap();
    holocron()
        .args(["clean", "--yes"])
        .env("HOLOCRON_CACHE_DIR", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 snapshot(s)."));
}

#[test]
fn test_query_requires_collection_argument() {
    holocron().arg("query").assert().failure();
}

#[test]
fn test_config_show_prints_effective_config() {
    let temp = TempDir::new().unwrap();
    holocron()
        .args(["config", "show"])
        .env("HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("swapi.co"))
        .stdout(predicate::str::contains("single-pass"));
}

#[test]
fn test_config_set_writes_global_file() {
    let temp = TempDir::new().unwrap();
    holocron()
        .args(["config", "set", "linking.policy", "fixed-point"])
        .env("HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("linking.policy"));

    let global = temp.path().join(".holocron").join("config.toml");
    let content = std::fs::read_to_string(global).unwrap();
    assert!(content.contains("fixed-point"));

    // The saved value becomes part of the effective configuration.
    holocron()
        .args(["config", "show"])
        .env("HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed-point"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let temp = TempDir::new().unwrap();
    holocron()
        .args(["config", "set", "remote.port", "80"])
        .env("HOME", temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_path_reports_global_location() {
    let temp = TempDir::new().unwrap();
    holocron()
        .args(["config", "path"])
        .env("HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".holocron"))
        .stdout(predicate::str::contains("not found"));
}
