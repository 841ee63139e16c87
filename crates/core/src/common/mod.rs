//! Common utilities and types shared by the trace, stats, and sim modules.
//!
//! This module provides:
//! 1. **Constants:** Tick resolution, default clock, and well-known file names.
//! 2. **Units:** Parsing and formatting of frequencies and memory sizes in the
//!    notation the simulator understands (`3GHz`, `4GB`, `1kB`).
//! 3. **Error Handling:** One error enum per subsystem.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types for trace reading, configuration, launching, and stats parsing.
pub mod error;

/// Frequency and memory size units.
pub mod units;

pub use constants::{TICKS_PER_SECOND, TRACE_TICKS_PER_CYCLE};
pub use error::{ConfigError, LaunchError, StatsError, TraceError};
pub use units::{Frequency, MemorySize};
