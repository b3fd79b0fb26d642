//! Error handling and argument parsing tests.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    assert_failure(&t.run(&["frobnicate"]));
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();
    let output = t.run(&["--help"]);
    assert_success(&output);
    for command in ["keygen", "push", "pull", "check", "audit", "scan", "completions"] {
        assert_stdout_contains(&output, command);
    }
}

#[test]
fn test_version() {
    let t = Test::new();
    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "envault");
}

#[test]
fn test_malformed_config_is_reported() {
    let t = Test::new();
    t.write(".envault.toml", "[audit\nexclude = 3\n");

    let output = t.audit();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_errors_use_cross_marker() {
    let t = Test::new();
    let output = t.check();
    assert_failure(&output);
    assert!(stderr(&output).starts_with("✗ "));
}

#[test]
fn test_completions_bash() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("envault").and(predicate::str::contains("audit")));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef envault"));
}

#[test]
fn test_completions_invalid_shell() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
