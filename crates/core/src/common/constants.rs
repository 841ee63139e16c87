//! Global constants.
//!
//! This module defines values shared across the crate. It includes:
//! 1. **Time Constants:** Simulator tick resolution and the trace clock.
//! 2. **File Constants:** Names of files the simulator reads and writes.

/// Simulator ticks per second (1 tick = 1 picosecond).
pub const TICKS_PER_SECOND: u64 = 1_000_000_000_000;

/// Ticks per cycle assumed when post-processing a commit trace.
///
/// A 3 GHz clock with 1 ps ticks gives 333.33 ticks per cycle. The value is
/// truncated to three decimals so reports stay comparable with earlier runs.
pub const TRACE_TICKS_PER_CYCLE: f64 = 333.333;

/// Column holding the commit timestamp in the commit-trace CSV.
pub const COMMIT_TICK_COLUMN: &str = "commit_tick";

/// Default output directory of the simulator.
pub const DEFAULT_OUTDIR: &str = "m5out";

/// File name of the rendered configuration script inside the output directory.
pub const CONFIG_SCRIPT_NAME: &str = "board_config.py";

/// Number of architectural integer registers on X86-64.
pub const X86_ARCH_INT_REGS: u32 = 16;

/// Number of architectural floating-point (XMM) registers on X86-64.
pub const X86_ARCH_FLOAT_REGS: u32 = 16;
