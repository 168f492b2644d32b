//! CLI integration tests
//!
//! Each test writes fixtures into a temp dir and runs the built binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn deepcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deepcheck"))
        .args(["--color", "never"])
        .args(args)
        .env_remove("DEEPCHECK_WIDTH")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_show_renders_numbered_escaped_rows() {
    let dir = TempDir::new().unwrap();
    let file = fixture(&dir, "input.txt", b"a b\n\tz");

    let output = deepcheck(&["show", file.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output), "1 │ a·b↵\n2 │ →→→→z\n");
}

#[test]
fn test_show_empty_file() {
    let dir = TempDir::new().unwrap();
    let file = fixture(&dir, "empty", b"");

    let output = deepcheck(&["show", file.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1 │ \n");
}

#[test]
fn test_show_wraps_at_width() {
    let dir = TempDir::new().unwrap();
    let file = fixture(&dir, "long", b"abcdefghij");

    let output = deepcheck(&["--width", "10", "show", file.to_str().unwrap()]);

    assert_eq!(stdout(&output), "1 │ abcdef\n  │ ghij\n");
}

#[test]
fn test_show_missing_file_fails() {
    let output = deepcheck(&["show", "/definitely/not/here.txt"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_INPUT"), "stderr: {}", stderr);
}

#[test]
fn test_diff_identical_files_exit_zero() {
    let dir = TempDir::new().unwrap();
    let expected = fixture(&dir, "expected", b"same\n");
    let actual = fixture(&dir, "actual", b"same\n");

    let output = deepcheck(&["diff", expected.to_str().unwrap(), actual.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("identical (5 bytes)\n"));
}

#[test]
fn test_diff_renders_prefix_once_and_both_suffixes() {
    let dir = TempDir::new().unwrap();
    let expected = fixture(&dir, "expected", b"Simple, small string.");
    let actual = fixture(&dir, "actual", b"Simple, tiny string.");

    let output = deepcheck(&["diff", expected.to_str().unwrap(), actual.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("diverge at byte 8"));
    assert_eq!(text.matches("Simple,·").count(), 1);
    assert!(text.contains("1 │ small·string.\n"));
    assert!(text.contains("1 │ tiny·string.\n"));
    assert!(text.find(" expected ").unwrap() < text.find(" actual ").unwrap());
}

#[test]
fn test_diff_json_summary() {
    let dir = TempDir::new().unwrap();
    let expected = fixture(&dir, "expected", b"one\ntwo");
    let actual = fixture(&dir, "actual", b"one\ntwo\nthree");

    let output = deepcheck(&[
        "diff",
        "--json",
        expected.to_str().unwrap(),
        actual.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["identical"], false);
    assert_eq!(summary["diverges_at"], 7);
    assert_eq!(summary["expected_len"], 7);
    assert_eq!(summary["actual_lines"], 3);
}
