//! Tests for the simulation module.


/// Configuration script rendering.
pub mod render;

/// Workload binary checks.
pub mod workload;
