//! Tests for `envault keygen`.

use crate::support::*;

#[test]
fn test_keygen_prints_key() {
    let t = Test::new();

    let output = t.run(&["keygen"]);
    assert_success(&output);

    let key = stdout(&output).trim().to_string();
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(!t.exists(".envault_key"));
}

#[test]
fn test_keygen_keys_differ() {
    let t = Test::new();
    let a = stdout(&t.run(&["keygen"]));
    let b = stdout(&t.run(&["keygen"]));
    assert_ne!(a, b);
}

#[test]
fn test_keygen_write_creates_key_and_gitignore() {
    let t = Test::new();

    let output = t.keygen_write();
    assert_success(&output);

    let key = t.read(".envault_key");
    assert_eq!(key.trim().len(), 64);
    assert!(key.ends_with('\n'));
    assert!(t.read(".gitignore").lines().any(|l| l == ".envault_key"));
}

#[cfg(unix)]
#[test]
fn test_keygen_write_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_key();
    let mode = std::fs::metadata(t.path(".envault_key"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_keygen_appends_to_existing_gitignore() {
    let t = Test::new();
    t.write(".gitignore", "target");

    assert_success(&t.keygen_write());
    assert_eq!(t.read(".gitignore"), "target\n.envault_key\n");
}

#[test]
fn test_keygen_refuses_overwrite_without_force() {
    let t = Test::with_key();
    let before = t.read(".envault_key");

    let output = t.keygen_write();
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_eq!(t.read(".envault_key"), before);
}

#[test]
fn test_keygen_force_overwrites() {
    let t = Test::with_key();
    let before = t.read(".envault_key");

    assert_success(&t.run(&["keygen", "--write", "--force"]));
    assert_ne!(t.read(".envault_key"), before);
    // Entry is not duplicated.
    assert_eq!(t.read(".gitignore").matches(".envault_key").count(), 1);
}

#[test]
fn test_keygen_honors_configured_key_file() {
    let t = Test::new();
    t.write(".envault.toml", "[keys]\nfile = \"team.key\"\n");

    assert_success(&t.keygen_write());
    assert!(t.exists("team.key"));
    assert!(!t.exists(".envault_key"));
    assert!(t.read(".gitignore").contains("team.key"));
}
