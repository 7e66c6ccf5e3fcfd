//! End-to-end tests for the `mnk` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn mnk() -> Command {
    Command::cargo_bin("mnk").expect("mnk binary should build")
}

/// Writes a Monkey script to a temp file and returns the handle.
fn script(source: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".mnk")
        .tempfile()
        .expect("failed to create temp script");
    file.write_all(source.as_bytes())
        .expect("failed to write temp script");
    file
}

#[test]
fn test_cli_help() {
    mnk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monkey"));
}

#[test]
fn test_cli_version() {
    mnk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mnk"));
}

#[test]
fn test_run_arithmetic_script() {
    let file = script("(5 + 10 * 2 + 15 / 3) * 2 + -10");
    mnk()
        .arg(file.path())
        .assert()
        .success()
        .stdout("50\n");
}

#[test]
fn test_run_closure_script() {
    let file = script("let newAdder = fn(x) { fn(y) { x + y } };\nnewAdder(2)(5)");
    mnk()
        .arg(file.path())
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_run_script_with_puts() {
    let file = script("puts(\"monkey\", 1 + 2)");
    mnk()
        .arg(file.path())
        .assert()
        .success()
        .stdout("monkey\n3\nnull\n");
}

#[test]
fn test_run_script_with_macro() {
    let file = script(
        "let unless = macro(condition, consequence, alternative) {
    quote(if (!(unquote(condition))) {
        unquote(consequence);
    } else {
        unquote(alternative);
    });
};
unless(10 > 5, \"not greater\", \"greater\")",
    );
    mnk()
        .arg(file.path())
        .assert()
        .success()
        .stdout("greater\n");
}

#[test]
fn test_parse_error_exits_nonzero() {
    let file = script("let x 5;");
    mnk()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("monkey business"))
        .stderr(predicate::str::contains(
            "expected next token to be =, got INT instead",
        ));
}

#[test]
fn test_eval_error_is_printed_as_value() {
    let file = script("5 + true;");
    mnk()
        .arg(file.path())
        .assert()
        .success()
        .stdout("ERROR: type mismatch: INTEGER + BOOLEAN\n");
}

#[test]
fn test_missing_script_exits_nonzero() {
    mnk()
        .arg("/definitely/not/here.mnk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_repl_over_stdin() {
    mnk()
        .write_stdin("let x = 20;\nx * 2 + 2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monkey programming language"))
        .stdout(predicate::str::contains(">> "))
        .stdout(predicate::str::contains("42"));
}

#[test]
fn test_repl_recovers_from_parse_error() {
    mnk()
        .write_stdin("let broken\n1 + 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("monkey business"))
        .stdout(predicate::str::contains("2"));
}
