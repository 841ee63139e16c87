//! Tests for the command-line binaries.

/// The CPI reporter.
pub mod cpi;
