//! Simulation launching.
//!
//! This module turns a [`BoardConfig`](crate::config::BoardConfig) into a gem5
//! run. It performs:
//! 1. **Workload checks:** The binary must exist and target the board's ISA.
//! 2. **Rendering:** The board is written out as a gem5 configuration script.
//! 3. **Launching:** The simulator runs on the script and its reports are read back.

/// Simulator process management.
pub mod launcher;
/// gem5 configuration script rendering.
pub mod render;
/// Workload binary checks.
pub mod workload;

pub use launcher::{Launcher, RunOutcome, locate_gem5};
pub use render::{ConfigScript, render_config_script};
pub use workload::check_workload;
