//! Integration tests for error-record and error-like-key rendering.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn logbrush() -> Command {
    let mut cmd = Command::cargo_bin("logbrush").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/logbrush-test-no-config");
    cmd
}

#[test]
fn error_record_renders_stack_block() {
    let input = r#"{"level":50,"msg":"boom","type":"Error","stack":"Error: boom\n    at a.js:1\n    at b.js:2"}"#;
    logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERROR: boom\n    Error: boom\n        at a.js:1\n        at b.js:2\n");
}

#[test]
fn error_props_star_lists_extra_fields() {
    let input = r#"{"level":50,"msg":"boom","type":"Error","stack":"Error: boom","code":"ENOENT","errno":-2}"#;
    logbrush()
        .args(["--color=never", "--error-props=*"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERROR: boom\n    Error: boom\n    code: ENOENT\n    errno: -2\n");
}

#[test]
fn error_props_list_selects_fields() {
    let input = r#"{"level":50,"msg":"boom","type":"Error","stack":"Error: boom","code":"ENOENT","errno":-2}"#;
    let output = logbrush()
        .args(["--color=never", "--error-props=code"])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("    code: ENOENT\n"));
    assert!(!stdout.contains("errno"));
}

#[test]
fn embedded_error_key_expands_stack() {
    let input = r#"{"level":50,"msg":"req failed","err":{"message":"boom","stack":"Error: boom\n    at a.js:1"}}"#;
    let output = logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ERROR: req failed\n"));
    assert!(stdout.contains("    err: {"));
    // the escaped stack is rewritten as readable lines
    assert!(stdout.contains("\"stack\":\n          Error: boom\n              at a.js:1"));
    assert!(!stdout.contains("\\n"));
}

#[test]
fn custom_error_like_keys() {
    let input = r#"{"level":50,"msg":"m","failure":{"stack":"Error: x\n    at y"}}"#;
    let output = logbrush()
        .args(["--color=never", "--error-like-keys=failure"])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("    failure: {"));
    assert!(!stdout.contains("\\n"));
}

#[test]
fn single_line_error_record_still_multi_line() {
    let input = r#"{"level":50,"msg":"boom","type":"Error","stack":"Error: boom"}"#;
    logbrush()
        .args(["--color=never", "--single-line"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERROR: boom\n    Error: boom\n");
}

#[test]
fn null_stack_renders_literal_null() {
    let input = r#"{"level":50,"msg":"m","err":{"stack":null}}"#;
    logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stack\": null"));
}
