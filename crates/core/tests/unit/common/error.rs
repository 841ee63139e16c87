//! # Error Message Tests
//!
//! The CPI reporter prints these messages verbatim after `Error: `.

use std::path::PathBuf;

use o3lab_core::common::{ConfigError, LaunchError, TraceError};
use o3lab_core::config::Isa;

#[test]
fn not_found_names_the_path() {
    let err = TraceError::NotFound {
        path: PathBuf::from("missing.csv"),
    };
    assert_eq!(err.to_string(), "File 'missing.csv' does not exist.");
}

#[test]
fn missing_column_message() {
    assert_eq!(
        TraceError::MissingColumn.to_string(),
        "CSV file does not contain 'commit_tick' column or is empty."
    );
}

#[test]
fn invalid_tick_quotes_the_value() {
    let err = TraceError::InvalidTick {
        row: 3,
        value: "abc".to_string(),
    };
    assert_eq!(err.to_string(), "invalid 'commit_tick' value \"abc\" in row 3");
}

#[test]
fn config_errors_pass_through_launch_errors() {
    let err: LaunchError = ConfigError::Invalid {
        field: "processor.width",
        reason: "must be greater than zero".to_string(),
    }
    .into();
    assert_eq!(err.to_string(), "processor.width: must be greater than zero");
}

#[test]
fn arch_mismatch_names_both_sides() {
    let err = ConfigError::WorkloadArchMismatch {
        path: PathBuf::from("a.out"),
        found: "Aarch64".to_string(),
        expected: Isa::X86,
    };
    let text = err.to_string();
    assert!(text.contains("a.out"));
    assert!(text.contains("Aarch64"));
    assert!(text.contains("X86"));
}

#[test]
fn failed_launch_reports_exit_code() {
    let err = LaunchError::Failed {
        program: PathBuf::from("gem5.opt"),
        status: Some(3),
    };
    assert_eq!(err.to_string(), "'gem5.opt' failed with exit code Some(3)");
}
