//! Tests for `envault audit`.

use crate::support::*;

#[test]
fn test_audit_reports_each_state() {
    let t = Test::new();
    t.project("api", None, true);
    t.project("web", Some(SAMPLE_ENV), true);
    t.project("worker", Some(MISSING_NEWLINE_ENV), true);
    t.project("scratch", Some(SAMPLE_ENV), false);

    let output = t.audit();
    assert_failure(&output);

    let out = stdout(&output);
    assert!(out.contains("MISSING   api (found config.enc, needs pull)"), "{}", out);
    assert!(out.contains("UNTRACKED scratch"), "{}", out);
    assert!(out.contains("PASS      web"), "{}", out);
    assert!(out.contains("FAIL      worker"), "{}", out);
    assert!(out.contains("- File does not end with a newline character"));
    assert_stderr_contains(&output, "found issues in 2 directories");
}

#[test]
fn test_audit_entries_are_sorted() {
    let t = Test::new();
    t.project("zeta", Some(SAMPLE_ENV), true);
    t.project("alpha", Some(SAMPLE_ENV), true);
    t.project("mid", Some(SAMPLE_ENV), true);

    let output = t.audit();
    assert_success(&output);

    let out = stdout(&output);
    let alpha = out.find("PASS      alpha").unwrap();
    let mid = out.find("PASS      mid").unwrap();
    let zeta = out.find("PASS      zeta").unwrap();
    assert!(alpha < mid && mid < zeta);
    assert_stdout_contains(&output, "checked 3 directories, 0 issues found");
}

#[test]
fn test_audit_fix_repairs_and_backs_up() {
    let t = Test::new();
    t.project("svc", Some(MISSING_NEWLINE_ENV), true);
    t.write("svc/.gitignore", "node_modules");

    let output = t.audit_fix();
    assert_success(&output);
    assert_stdout_contains(&output, "FIXED     svc (backup created)");
    assert_stdout_contains(&output, "fixed 1");

    assert_eq!(t.read("svc/.env"), "FOO=bar\n");
    assert_eq!(t.read("svc/.env.bak"), MISSING_NEWLINE_ENV);
    assert_eq!(t.read("svc/.gitignore"), "node_modules\n.env.bak\n");
}

#[test]
fn test_audit_fix_does_not_create_gitignore() {
    let t = Test::new();
    t.project("svc", Some(MISSING_NEWLINE_ENV), true);

    assert_success(&t.audit_fix());
    assert!(!t.exists("svc/.gitignore"));
}

#[test]
fn test_audit_fix_still_fails_on_missing() {
    let t = Test::new();
    t.project("api", None, true);
    t.project("svc", Some(BROKEN_ENV), true);

    let output = t.audit_fix();
    assert_failure(&output);
    assert_stderr_contains(&output, "found issues in 2 directories");
    assert_eq!(t.read("svc/.env"), BROKEN_ENV);
}

#[test]
fn test_audit_skips_hidden_and_excluded() {
    let t = Test::new();
    t.project(".cache", None, true);
    t.project("node_modules", None, true);
    t.project("web", Some(SAMPLE_ENV), true);
    t.write(".envault.toml", "[audit]\nexclude = [\"node_modules\"]\n");

    let output = t.audit();
    assert_success(&output);
    let out = stdout(&output);
    assert!(!out.contains(".cache"));
    assert!(!out.contains("node_modules"));
}

#[test]
fn test_audit_json() {
    let t = Test::new();
    t.project("api", None, true);
    t.project("web", Some("A = 1\n"), true);

    let output = t.audit_json();
    assert_failure(&output);

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["issues"], 1);
    assert_eq!(report["scanned"], 1);
    assert_eq!(report["entries"][0]["dir"], "api");
    assert_eq!(report["entries"][0]["state"], "MISSING");
    assert_eq!(report["entries"][1]["state"], "PASS");
    assert_eq!(
        report["entries"][1]["warnings"][0],
        "Line 1: whitespace around '=' in 'A'"
    );
}

#[test]
fn test_audit_dir_flag() {
    let t = Test::new();
    t.project("repos/one", Some(SAMPLE_ENV), true);

    let output = t.run(&["audit", "--dir", "repos"]);
    assert_success(&output);
    assert_stdout_contains(&output, "PASS      one");
}

#[test]
fn test_audit_missing_root_fails() {
    let t = Test::new();

    let output = t.run(&["audit", "--dir", "nowhere"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "nowhere");
}
