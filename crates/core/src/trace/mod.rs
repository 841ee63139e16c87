//! Commit-trace reading.
//!
//! The `InstCsvTrace` probe writes one CSV row per committed instruction. Only
//! the `commit_tick` column matters here: the reader streams the file once and
//! keeps the row count plus the first and last rows' commit ticks.

/// Streaming CSV reader for commit traces.
pub mod reader;

pub use reader::{TraceSummary, read_commit_trace, scan_commit_trace};
