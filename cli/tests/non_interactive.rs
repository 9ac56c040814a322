//! E2E tests for a non-interactive binary usage.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

const BINARY: &str = env!("CARGO_BIN_EXE_infix-eval");

fn run(args: &[&str]) -> Output {
    Command::new(BINARY)
        .args(args)
        .env_remove("INFIX_EVAL_ARITHMETIC")
        .output()
        .expect("failed running binary")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(BINARY)
        .args(args)
        .env_remove("INFIX_EVAL_ARITHMETIC")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed spawning binary");
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).unwrap();
    drop(stdin);
    child.wait_with_output().unwrap()
}

fn assert_success(args: &[&str], expected_stdout: &str) {
    let output = run(args);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{args:?} failed: {stderr}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected_stdout, "{args:?}");
}

fn assert_failure(args: &[&str], expected_stderr: &str) {
    let output = run(args);
    assert_eq!(output.status.code(), Some(2), "{args:?}");
    assert!(output.stdout.is_empty(), "{args:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(expected_stderr), "{args:?}: {stderr}");
}

#[test]
fn successful_execution_for_arithmetics() {
    assert_success(&["1 + 2 * 3"], "7\n");
    assert_success(&["-a", "f32", "1 + 3 / 2"], "2.5\n");
    assert_success(&["-a", "i64", "1 - 2 * 3"], "-5\n");
    assert_success(&["-a", "u128", "2 ^ 71 - 1"], "2361183241434822606847\n");
    assert_success(&["-a", "u64", "--wrapping", "1 - 2 + 3"], "2\n");
    assert_success(
        &["-a", "bigint", "2 ^ 100 + 1"],
        "1267650600228229401496703205377\n",
    );
}

#[test]
fn evaluating_functions() {
    assert_success(&["if(5 > 3, yes, no)"], "yes\n");
    assert_success(&["max(1, sqrt(16), 3) - 1"], "3\n");
    assert_success(&["-a", "i64", "min(3, abs(-2))"], "2\n");
}

#[test]
fn using_variables() {
    assert_success(&["--var", "foo=3", "--var", "bar = 4", "$foo * $bar"], "12\n");
    assert_success(&["floor($pi * 100)"], "314\n");
    assert_success(&["--var", "pi=3", "$pi"], "3\n");
}

#[test]
fn division_by_zero_policy() {
    assert_failure(&["-a", "i64", "1 / 0"], "integer division by zero");
    assert_success(&["-a", "i64", "--zero-div", "1 / 0"], "0\n");
    assert_success(&["1 / 0"], "inf\n");
}

#[test]
fn evaluation_errors() {
    assert_failure(&["(1 + 2"], "syntax error at index 0");
    assert_failure(&["-a", "u64", "1 - 2"], "integer overflow");
    assert_failure(&["nope(1)"], "function `nope` is not defined");
    assert_failure(&["$missing"], "unable to resolve variable `missing`");
}

#[test]
fn invalid_options() {
    let output = run(&["-a", "c64", "1"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid arithmetic spec"), "{stderr}");

    let output = run(&["--var", "1x=2", "1"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("EXIT CODES"));
}

#[test]
fn reading_stdin_line_by_line() {
    let output = run_with_stdin(&[], "1 + 1\n\n  2 * 3\n:set x = 5\n$x - 1\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n6\n4\n");

    let output = run_with_stdin(&["-a", "i64"], "1 +\n2\n");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error"), "{stderr}");
}
