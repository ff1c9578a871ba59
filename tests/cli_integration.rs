//! Integration tests for the `dudu` binary.
//!
//! Launching with a file starts the terminal UI, so only the flags that exit
//! before the UI comes up are exercised here.

use std::path::PathBuf;
use std::process::Command;

/// Get the path to the built `dudu` binary.
fn dudu_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("dudu");
    path
}

fn run_dudu(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(dudu_bin())
        .args(args)
        .output()
        .expect("failed to run dudu");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_help() {
    let (stdout, _, ok) = run_dudu(&["--help"]);
    assert!(ok);
    assert!(stdout.contains("todo lists in plain JSON files"));
    assert!(stdout.contains("[FILE]"));
}

#[test]
fn test_version() {
    let (stdout, _, ok) = run_dudu(&["--version"]);
    assert!(ok);
    assert_eq!(
        stdout.trim(),
        format!("dudu {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_unknown_flag_fails() {
    let (_, stderr, ok) = run_dudu(&["--frobnicate"]);
    assert!(!ok);
    assert!(stderr.contains("--frobnicate"));
}

#[test]
fn test_extra_argument_fails() {
    let (_, stderr, ok) = run_dudu(&["one.todo", "two.todo"]);
    assert!(!ok);
    assert!(stderr.contains("two.todo"));
}
