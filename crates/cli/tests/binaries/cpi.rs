use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn cpi(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cpi"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn trace_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_report_on_stdout() {
    let file = trace_file("pc,commit_tick\n0x0,100\n0x4,500\n0x8,900\n");
    let out = cpi(&[path_str(file.path())]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "\
=== CPI Calculation from Trace ===
Total Instructions: 3
First Commit Tick:  100
Last Commit Tick:   900
Total Ticks:        800
Total Cycles:       2.40
CPI:                0.8000
IPC:                1.2500
"
    );
}

#[test]
fn test_explicit_ticks_per_cycle() {
    let file = trace_file("commit_tick\n0\n1000\n");
    let out = cpi(&["--ticks-per-cycle", "250", path_str(file.path())]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Total Cycles:       4.00\n"));
    assert!(stdout.contains("CPI:                2.0000\n"));
    assert!(stdout.contains("IPC:                0.5000\n"));
}

#[test]
fn test_single_row_has_no_ipc() {
    let file = trace_file("commit_tick\n42\n");
    let out = cpi(&[path_str(file.path())]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8(out.stdout).unwrap().ends_with("IPC: N/A\n"));
}

#[test]
fn test_no_arguments_prints_usage() {
    let out = cpi(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
        String::from_utf8(out.stderr).unwrap(),
        "Usage: cpi <path_to_csv>\n"
    );
}

#[test]
fn test_extra_arguments_print_usage() {
    let out = cpi(&["a.csv", "b.csv"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8(out.stderr).unwrap().contains("Usage: cpi"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let out = cpi(&[path_str(&path)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
        String::from_utf8(out.stderr).unwrap(),
        format!("Error: File '{}' does not exist.\n", path.display())
    );
}

#[test]
fn test_header_only_trace() {
    let file = trace_file("pc,fetch_tick,commit_tick\n");
    let out = cpi(&[path_str(file.path())]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
        String::from_utf8(out.stderr).unwrap(),
        "Error: CSV file does not contain 'commit_tick' column or is empty.\n"
    );
}

#[test]
fn test_trace_without_commit_tick_column() {
    let file = trace_file("pc,fetch_tick\n0x0,10\n");
    let out = cpi(&[path_str(file.path())]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
        String::from_utf8(out.stderr).unwrap(),
        "Error: CSV file does not contain 'commit_tick' column or is empty.\n"
    );
}

#[test]
fn test_rejects_non_positive_period() {
    let file = trace_file("commit_tick\n0\n1000\n");
    let out = cpi(&["--ticks-per-cycle", "0", path_str(file.path())]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_help_succeeds() {
    let out = cpi(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8(out.stdout).unwrap().contains("commit_tick"));
}
