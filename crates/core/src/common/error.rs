//! Error definitions.
//!
//! This module defines the error types for every fallible subsystem. It provides:
//! 1. **Trace Errors:** Missing files, missing columns, and malformed tick values.
//! 2. **Config Errors:** Unparseable units, invariant violations, and bad workloads.
//! 3. **Launch Errors:** Simulator lookup, process failure, and missing reports.
//! 4. **Stats Errors:** Unreadable `stats.txt` / `stats.json` output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::Isa;

/// Errors raised while reading a commit-trace CSV.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace path does not name an existing regular file.
    #[error("File '{}' does not exist.", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The CSV has no data rows or no `commit_tick` header.
    #[error("CSV file does not contain 'commit_tick' column or is empty.")]
    MissingColumn,

    /// A row is too short to carry the `commit_tick` field.
    #[error("row {row} has no 'commit_tick' field")]
    MissingField {
        /// One-based data row number.
        row: u64,
    },

    /// A `commit_tick` field is not an integer.
    #[error("invalid 'commit_tick' value {value:?} in row {row}")]
    InvalidTick {
        /// One-based data row number.
        row: u64,
        /// Raw field contents.
        value: String,
    },

    /// The tick span does not fit in a signed 64-bit integer.
    #[error("tick span from {first} to {last} overflows")]
    TickOverflow {
        /// First commit tick.
        first: i64,
        /// Last commit tick.
        last: i64,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Errors raised while loading or validating a board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid JSON for a board.
    #[error("invalid board config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A frequency string such as `3GHz` could not be parsed.
    #[error("invalid frequency {0:?}")]
    InvalidFrequency(String),

    /// A memory size string such as `4GB` could not be parsed.
    #[error("invalid memory size {0:?}")]
    InvalidMemorySize(String),

    /// A field violates a board invariant.
    #[error("{field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// The workload binary does not exist.
    #[error("workload binary '{}' does not exist", .0.display())]
    WorkloadMissing(PathBuf),

    /// The workload path cannot be written into the configuration script.
    #[error("workload path '{}' is not valid UTF-8", .0.display())]
    WorkloadPathNotUtf8(PathBuf),

    /// The workload binary could not be read or parsed as an object file.
    #[error("workload binary '{}' is not an executable object: {reason}", .path.display())]
    WorkloadUnreadable {
        /// Workload path.
        path: PathBuf,
        /// Parser or I/O error text.
        reason: String,
    },

    /// The workload binary targets a different architecture than the board.
    #[error("workload binary '{}' targets {found}, board expects {expected}", .path.display())]
    WorkloadArchMismatch {
        /// Workload path.
        path: PathBuf,
        /// Architecture found in the object header.
        found: String,
        /// ISA of the configured board.
        expected: Isa,
    },
}

/// Errors raised while launching the external simulator.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The board configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No simulator binary was given and none was found on `PATH`.
    #[error("gem5 binary not found (pass --gem5, set GEM5, or put gem5.opt on PATH)")]
    SimulatorNotFound,

    /// The simulator process could not be started.
    #[error("failed to start '{}': {source}", .program.display())]
    Spawn {
        /// Simulator binary.
        program: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The simulator exited unsuccessfully.
    #[error("'{}' failed with exit code {status:?}", .program.display())]
    Failed {
        /// Simulator binary.
        program: PathBuf,
        /// Exit code, `None` when killed by a signal.
        status: Option<i32>,
    },

    /// The simulator finished but a statistics report is missing.
    #[error("simulator did not write '{}'", .0.display())]
    MissingOutput(PathBuf),

    /// Underlying I/O failure (output directory, script file).
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The statistics reports could not be read.
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Errors raised while reading simulator statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// `stats.json` is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// `stats.txt` contains no statistics block.
    #[error("no statistics block found")]
    Empty,
}
