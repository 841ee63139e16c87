//! Test fixtures shared across the unit tests.

/// Temporary files and directories for traces and simulator output.
pub mod harness;
