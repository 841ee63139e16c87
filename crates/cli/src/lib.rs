//! Shared plumbing for the o3lab command-line tools.
//!
//! The crate ships two binaries:
//! 1. **`cpi`:** CPI/IPC report for a commit-trace CSV.
//! 2. **`launch`:** Renders the out-of-order board and runs it under gem5.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so reports on stdout stay machine-readable. `RUST_LOG`
/// overrides `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
