//! Integration tests for minimum-level filtering.

use assert_cmd::Command;

#[allow(deprecated)]
fn logbrush() -> Command {
    let mut cmd = Command::cargo_bin("logbrush").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/logbrush-test-no-config");
    cmd
}

#[test]
fn min_level_warn_drops_lower_levels() {
    let input = r#"{"level":20,"msg":"debug msg"}
{"level":30,"msg":"info msg"}
{"level":40,"msg":"warn msg"}
{"level":50,"msg":"error msg"}
{"level":60,"msg":"fatal msg"}"#;

    let output = logbrush()
        .args(["--color=never", "--min-level=warn"])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!stdout.contains("debug msg"), "debug should be filtered");
    assert!(!stdout.contains("info msg"), "info should be filtered");
    assert!(stdout.contains("warn msg"), "warn should pass");
    assert!(stdout.contains("error msg"), "error should pass");
    assert!(stdout.contains("fatal msg"), "fatal should pass");
}

#[test]
fn min_level_boundary_is_inclusive() {
    logbrush()
        .args(["--color=never", "--min-level=info"])
        .write_stdin(r#"{"level":30,"msg":"kept"}"#)
        .assert()
        .success()
        .stdout("INFO: kept\n");
}

#[test]
fn min_level_accepts_numbers() {
    let input = r#"{"level":30,"msg":"info msg"}
{"level":40,"msg":"warn msg"}"#;
    let output = logbrush()
        .args(["--color=never", "--min-level=35"])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("info msg"));
    assert!(stdout.contains("warn msg"));
}

#[test]
fn named_levels_resolve_for_filtering() {
    let input = r#"{"level":"info","msg":"info msg"}
{"level":"error","msg":"error msg"}"#;
    let output = logbrush()
        .args(["--color=never", "--min-level=warn"])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("info msg"));
    assert!(stdout.contains("error msg"));
}

#[test]
fn custom_levels_filterable() {
    let input = r#"{"level":60,"msg":"fatal msg"}
{"level":70,"msg":"critical msg"}"#;
    let output = logbrush()
        .args([
            "--color=never",
            "--custom-levels=critical:70",
            "--min-level=critical",
        ])
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("fatal msg"));
    assert!(stdout.contains("CRITICAL: critical msg"));
}

#[test]
fn records_without_level_are_kept() {
    logbrush()
        .args(["--color=never", "--min-level=fatal"])
        .write_stdin(r#"{"msg":"no level here"}"#)
        .assert()
        .success()
        .stdout("no level here\n");
}

#[test]
fn raw_lines_always_pass() {
    logbrush()
        .args(["--color=never", "--min-level=fatal"])
        .write_stdin("plain text")
        .assert()
        .success()
        .stdout("plain text\n");
}
