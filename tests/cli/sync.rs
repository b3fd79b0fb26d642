//! Tests for `envault push` and `envault pull`.

use crate::support::*;

#[test]
fn test_push_then_pull_restores_env() {
    let t = Test::with_key();
    t.write(".env", SAMPLE_ENV_COMPLEX);

    assert_success(&t.push());
    let sealed = t.read("config.enc");
    assert!(sealed.ends_with('\n'));
    assert_eq!(sealed.trim().split(':').count(), 3);
    assert!(!sealed.contains("SIMPLE"));

    std::fs::remove_file(t.path(".env")).unwrap();
    let output = t.pull();
    assert_success(&output);
    assert_eq!(t.read(".env"), SAMPLE_ENV_COMPLEX);
}

#[test]
fn test_push_uses_env_var_key() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t
        .cmd()
        .env("ENVAULT_KEY", TEST_KEY)
        .arg("push")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.exists("config.enc"));
    assert!(!t.exists(".envault_key"));
}

#[test]
fn test_env_var_takes_precedence_over_key_file() {
    let t = Test::new();
    t.write(".envault_key", &format!("{}\n", OTHER_KEY));
    t.write(".env", SAMPLE_ENV);

    let push = t
        .cmd()
        .env("ENVAULT_KEY", TEST_KEY)
        .arg("push")
        .output()
        .unwrap();
    assert_success(&push);
    std::fs::remove_file(t.path(".env")).unwrap();

    // Key file alone holds the wrong key.
    let output = t.pull();
    assert_failure(&output);
    assert_stderr_contains(&output, "authentication failed");

    let output = t
        .cmd()
        .env("ENVAULT_KEY", TEST_KEY)
        .arg("pull")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.read(".env"), SAMPLE_ENV);
}

#[test]
fn test_push_without_key_fails_with_hint() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.push();
    assert_failure(&output);
    assert_stderr_contains(&output, "no key found");
    assert_stdout_contains(&output, "envault keygen --write");
    assert!(!t.exists("config.enc"));
}

#[test]
fn test_push_with_invalid_key_fails() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t
        .cmd()
        .env("ENVAULT_KEY", "abc123")
        .arg("push")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid key");
    assert!(!stderr(&output).contains("abc123"));
}

#[test]
fn test_pull_wrong_key_writes_nothing() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);
    let push = t
        .cmd()
        .env("ENVAULT_KEY", TEST_KEY)
        .arg("push")
        .output()
        .unwrap();
    assert_success(&push);
    std::fs::remove_file(t.path(".env")).unwrap();

    let output = t
        .cmd()
        .env("ENVAULT_KEY", OTHER_KEY)
        .arg("pull")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "authentication failed");
    assert!(!t.exists(".env"));
}

#[test]
fn test_pull_tampered_envelope_fails() {
    let t = Test::with_key();
    t.write(".env", SAMPLE_ENV);
    assert_success(&t.push());
    std::fs::remove_file(t.path(".env")).unwrap();

    let sealed = t.read("config.enc");
    let mut chars: Vec<char> = sealed.trim().chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == '0' { '1' } else { '0' };
    t.write("config.enc", &chars.into_iter().collect::<String>());

    let output = t.pull();
    assert_failure(&output);
    assert_stderr_contains(&output, "authentication failed");
    assert!(!t.exists(".env"));
}

#[test]
fn test_pull_malformed_envelope_fails() {
    let t = Test::with_key();
    t.write("config.enc", "not-an-envelope\n");

    let output = t.pull();
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed envelope");
}

#[test]
fn test_pull_refuses_to_overwrite_local_changes() {
    let t = Test::with_key();
    t.write(".env", SAMPLE_ENV);
    assert_success(&t.push());
    t.write(".env", "LOCAL=edit\n");

    let output = t.pull();
    assert_failure(&output);
    assert_stderr_contains(&output, "--force");
    assert_eq!(t.read(".env"), "LOCAL=edit\n");

    let output = t.run(&["pull", "--force"]);
    assert_success(&output);
    assert_eq!(t.read(".env"), SAMPLE_ENV);
    assert_eq!(t.read(".env.bak"), "LOCAL=edit\n");
}

#[test]
fn test_pull_identical_is_noop() {
    let t = Test::with_key();
    t.write(".env", SAMPLE_ENV);
    assert_success(&t.push());

    let output = t.pull();
    assert_success(&output);
    assert_stdout_contains(&output, "already up to date");
    assert!(!t.exists(".env.bak"));
}

#[test]
fn test_push_pull_with_dir_flag() {
    let t = Test::new();
    t.write("svc/.env", SAMPLE_ENV);
    t.write("svc/.envault_key", &format!("{}\n", TEST_KEY));

    assert_success(&t.run(&["push", "--dir", "svc"]));
    assert!(t.exists("svc/config.enc"));

    std::fs::remove_file(t.path("svc/.env")).unwrap();
    assert_success(&t.run(&["pull", "--dir", "svc"]));
    assert_eq!(t.read("svc/.env"), SAMPLE_ENV);
}
