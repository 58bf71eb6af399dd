//! Integration tests for the message-format mini-language.

use assert_cmd::Command;

#[allow(deprecated)]
fn logbrush() -> Command {
    let mut cmd = Command::cargo_bin("logbrush").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/logbrush-test-no-config");
    cmd
}

#[test]
fn template_substitutes_tokens() {
    let input = r#"{"level":30,"msg":"listening","port":8080}"#;
    logbrush()
        .args(["--color=never", "--hide-object", "-o", "{msg} on :{port}"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: listening on :8080\n");
}

#[test]
fn template_level_label_token() {
    let input = r#"{"level":40,"msg":"careful"}"#;
    logbrush()
        .args(["--color=never", "-o", "{levelLabel} - {msg}"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("WARN: WARN - careful\n");
}

#[test]
fn template_dotted_path_token() {
    let input = r#"{"level":30,"msg":"req","req":{"id":"r-1"}}"#;
    logbrush()
        .args(["--color=never", "--hide-object", "-o", "{req.id} {msg}"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: r-1 req\n");
}

#[test]
fn conditional_block_kept_when_key_present() {
    let input = r#"{"level":30,"msg":"m","pid":7}"#;
    logbrush()
        .args(["--color=never", "--hide-object", "-o", "{if pid}[{pid}] {end}{msg}"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: [7] m\n");
}

#[test]
fn conditional_block_dropped_when_key_absent() {
    let input = r#"{"level":30,"msg":"m"}"#;
    logbrush()
        .args(["--color=never", "--hide-object", "-o", "{if pid}[{pid}] {end}{msg}"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: m\n");
}

#[test]
fn unresolved_token_renders_empty() {
    let input = r#"{"level":30,"msg":"m"}"#;
    logbrush()
        .args(["--color=never", "--hide-object", "-o", "{missing}{msg}"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("INFO: m\n");
}

#[test]
fn custom_level_label_token_name() {
    let input = r#"{"level":50,"msg":"m"}"#;
    logbrush()
        .args([
            "--color=never",
            "--hide-object",
            "--level-label=lvl",
            "-o",
            "{lvl}: {msg}",
        ])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERROR: ERROR: m\n");
}
