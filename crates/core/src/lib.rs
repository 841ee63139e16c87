//! Commit-trace analysis and gem5 board launching.
//!
//! This crate carries the two halves of the o3lab tooling:
//! 1. **Trace analysis:** Streaming reader for the commit-trace CSV written by the
//!    `InstCsvTrace` probe, and the CPI/IPC report derived from it.
//! 2. **Board configuration:** Typed description of the out-of-order X86 board
//!    (core, branch predictor, caches, memory, clock, workload).
//! 3. **Simulation:** Rendering of the board into a gem5 configuration script,
//!    launching the external simulator, and reading back its statistics.

/// Common types and constants (units, clock, error types).
pub mod common;
/// Board configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Config script rendering, workload checks, and simulator launching.
pub mod sim;
/// CPI reporting and gem5 statistics readers.
pub mod stats;
/// Commit-trace CSV reading.
pub mod trace;

/// Root configuration type; use `BoardConfig::default()` or load from JSON.
pub use crate::config::BoardConfig;
/// Launches the external simulator for a board.
pub use crate::sim::Launcher;
/// CPI/IPC report computed from a commit trace.
pub use crate::stats::CpiReport;
/// Summary of a commit trace (row count and first/last commit tick).
pub use crate::trace::TraceSummary;
