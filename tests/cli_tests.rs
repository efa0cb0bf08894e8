//! End-to-end tests for the `kmeans` command-line binary.

use std::io::Write;
use std::process::{Command, Stdio};

fn run_cli(args: &[&str], stdin: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_kmeans"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_cli_prints_centroids() {
    let output = run_cli(&["2", "100"], "0,0\n10,0\n0,1\n10,1\n");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "0.0000,0.5000\n10.0000,0.5000\n"
    );
}

#[test]
fn test_cli_rejects_bad_k() {
    let output = run_cli(&["4"], "0,0\n10,0\n0,1\n10,1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Incorrect number of clusters"));
}

#[test]
fn test_cli_rejects_bad_max_iter() {
    let output = run_cli(&["2", "1000"], "0,0\n10,0\n0,1\n10,1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_rejects_ragged_input() {
    let output = run_cli(&["2"], "0,0\n10,0\n0,1,2\n10,1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 3"));
}

#[test]
fn test_cli_rejects_empty_input() {
    let output = run_cli(&["2"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No input provided"));
}

#[test]
fn test_cli_quiet_by_default() {
    let output = run_cli(&["2"], "0,0\n10,0\n0,1\n10,1\n");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_cli_verbose_logs_iterations() {
    let output = run_cli(&["2", "-v"], "0,0\n10,0\n0,1\n10,1\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("k-means iteration"), "stderr: {}", stderr);
    assert!(stderr.contains("k-means converged"), "stderr: {}", stderr);
    // Logs never leak into the centroid output
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "0.0000,0.5000\n10.0000,0.5000\n"
    );
}

#[test]
fn test_cli_rejects_non_numeric_field() {
    let output = run_cli(&["2"], "0,0\n10,zero\n0,1\n10,1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Line 2"));
}
