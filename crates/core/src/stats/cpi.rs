//! CPI/IPC reporting from a commit trace.
//!
//! The cycle count is derived from the commit tick span and a fixed clock
//! period in ticks, so the result is only meaningful when `ticks_per_cycle`
//! matches the clock and tick resolution of the run that produced the trace.

use std::fmt;

use super::format::{group_float, group_int};
use crate::common::constants::TRACE_TICKS_PER_CYCLE;
use crate::common::error::TraceError;
use crate::trace::TraceSummary;

/// Cycles per instruction for a tick span over `num_insts` commits.
///
/// Returns 0 when there are no instructions.
pub fn cycles_per_instruction(total_ticks: i64, num_insts: u64, ticks_per_cycle: f64) -> f64 {
    if num_insts == 0 {
        return 0.0;
    }
    (total_ticks as f64 / ticks_per_cycle) / num_insts as f64
}

/// CPI/IPC figures for a commit trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpiReport {
    /// Committed instructions (trace rows).
    pub num_insts: u64,
    /// `commit_tick` of the first row.
    pub first_commit_tick: i64,
    /// `commit_tick` of the last row.
    pub last_commit_tick: i64,
    /// `last_commit_tick - first_commit_tick`.
    pub total_ticks: i64,
    /// `total_ticks / ticks_per_cycle`.
    pub total_cycles: f64,
    /// `total_cycles / num_insts`.
    pub cpi: f64,
}

impl CpiReport {
    /// Builds a report with the default 3 GHz trace clock.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::TickOverflow`] if the tick span overflows.
    pub fn from_summary(summary: &TraceSummary) -> Result<Self, TraceError> {
        Self::with_ticks_per_cycle(summary, TRACE_TICKS_PER_CYCLE)
    }

    /// Builds a report with an explicit clock period in ticks.
    ///
    /// `ticks_per_cycle` must be finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::TickOverflow`] if the tick span overflows.
    pub fn with_ticks_per_cycle(
        summary: &TraceSummary,
        ticks_per_cycle: f64,
    ) -> Result<Self, TraceError> {
        debug_assert!(ticks_per_cycle.is_finite() && ticks_per_cycle > 0.0);
        let total_ticks = summary.total_ticks()?;
        let total_cycles = total_ticks as f64 / ticks_per_cycle;
        Ok(Self {
            num_insts: summary.num_insts,
            first_commit_tick: summary.first_commit_tick,
            last_commit_tick: summary.last_commit_tick,
            total_ticks,
            total_cycles,
            cpi: cycles_per_instruction(total_ticks, summary.num_insts, ticks_per_cycle),
        })
    }

    /// Instructions per cycle, `None` unless CPI is positive.
    pub fn ipc(&self) -> Option<f64> {
        (self.cpi > 0.0).then(|| 1.0 / self.cpi)
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for CpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_insts = i64::try_from(self.num_insts).unwrap_or(i64::MAX);
        writeln!(f, "=== CPI Calculation from Trace ===")?;
        writeln!(f, "Total Instructions: {}", group_int(num_insts))?;
        writeln!(f, "First Commit Tick:  {}", group_int(self.first_commit_tick))?;
        writeln!(f, "Last Commit Tick:   {}", group_int(self.last_commit_tick))?;
        writeln!(f, "Total Ticks:        {}", group_int(self.total_ticks))?;
        writeln!(f, "Total Cycles:       {}", group_float(self.total_cycles, 2))?;
        writeln!(f, "CPI:                {:.4}", self.cpi)?;
        match self.ipc() {
            Some(ipc) => writeln!(f, "IPC:                {ipc:.4}"),
            None => writeln!(f, "IPC: N/A"),
        }
    }
}
