//! Integration tests for basic stdin->stdout piping.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn logbrush() -> Command {
    let mut cmd = Command::cargo_bin("logbrush").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/logbrush-test-no-config");
    cmd
}

#[test]
fn empty_stdin_exits_zero() {
    logbrush().write_stdin("").assert().success().stdout("");
}

#[test]
fn single_json_line_outputs_exact_format() {
    let input = r#"{"time":1522431328992,"level":30,"msg":"foo","pid":1,"hostname":"h"}"#;
    logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("[17:35:28.992] INFO (1 on h): foo\n");
}

#[test]
fn raw_line_passes_through_unchanged() {
    logbrush()
        .arg("--color=never")
        .write_stdin("not json")
        .assert()
        .success()
        .stdout("not json\n");
}

#[test]
fn json_array_passes_through() {
    logbrush()
        .arg("--color=never")
        .write_stdin("[1, 2, 3]")
        .assert()
        .success()
        .stdout("[1, 2, 3]\n");
}

#[test]
fn residual_fields_on_indented_lines() {
    let input = r#"{"level":30,"msg":"req","method":"GET","status":200}"#;
    logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("    method: \"GET\"\n"))
        .stdout(predicate::str::contains("    status: 200\n"));
}

#[test]
fn residual_fields_keep_insertion_order() {
    let input = r#"{"level":30,"msg":"t","zebra":"z","alpha":"a","middle":"m"}"#;
    let output = logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let zebra = stdout.find("zebra:").unwrap();
    let alpha = stdout.find("alpha:").unwrap();
    let middle = stdout.find("middle:").unwrap();
    assert!(zebra < alpha, "zebra should come before alpha");
    assert!(alpha < middle, "alpha should come before middle");
}

#[test]
fn nested_object_indented() {
    let input = r#"{"level":30,"msg":"req","http":{"method":"GET"}}"#;
    logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "    http: {\n      \"method\": \"GET\"\n    }\n",
        ));
}

#[test]
fn empty_record_writes_empty_output() {
    logbrush()
        .arg("--color=never")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn mixed_json_and_raw_lines() {
    let input = "starting up\n{\"level\":30,\"msg\":\"ready\"}\nshutting down";
    logbrush()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("starting up\nINFO: ready\nshutting down\n");
}

#[test]
fn single_line_flag_compacts_residual() {
    let input = r#"{"level":30,"msg":"m","extra":{"a":1}}"#;
    logbrush()
        .args(["--color=never", "--single-line"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: m {\"extra\":{\"a\":1}}\n");
}

#[test]
fn crlf_flag_changes_terminator() {
    logbrush()
        .args(["--color=never", "--crlf"])
        .write_stdin("not json")
        .assert()
        .success()
        .stdout("not json\r\n");
}

#[test]
fn hide_object_suppresses_residual() {
    let input = r#"{"level":30,"msg":"m","port":8080}"#;
    logbrush()
        .args(["--color=never", "--hide-object"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: m\n");
}

#[test]
fn level_first_flag_reorders_header() {
    let input = r#"{"time":1522431328992,"level":30,"msg":"foo"}"#;
    logbrush()
        .args(["--color=never", "--level-first"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO [17:35:28.992]: foo\n");
}

#[test]
fn completions_flag_prints_script() {
    logbrush()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logbrush"));
}
