//! Statistics derived from simulator output.
//!
//! This module provides:
//! 1. **CPI:** Cycles-per-instruction and IPC computed from a commit trace.
//! 2. **Formatting:** Thousands-separated number rendering for reports.
//! 3. **gem5 reports:** Readers for the `stats.txt` and `stats.json` dumps.

/// CPI/IPC report derived from a commit trace.
pub mod cpi;
/// Number formatting helpers.
pub mod format;
/// Readers for gem5 statistics dumps.
pub mod gem5;

pub use cpi::{CpiReport, cycles_per_instruction};
pub use gem5::{Gem5Stats, StatsDump, load_json_stats};
