//! Workload binary checks.
//!
//! Syscall-emulation mode loads the binary straight into the simulated
//! process, so a missing file or a binary built for another architecture only
//! shows up deep into simulator start-up. Both are caught here instead.

use std::fs;
use std::path::Path;

use object::{Architecture, Object};

use crate::common::error::ConfigError;
use crate::config::Isa;

/// Object-file architectures a core of the given ISA can execute.
const fn accepted_architectures(isa: Isa) -> &'static [Architecture] {
    match isa {
        Isa::X86 => &[Architecture::X86_64, Architecture::I386],
        Isa::Arm => &[Architecture::Aarch64, Architecture::Arm],
        Isa::Riscv => &[Architecture::Riscv64, Architecture::Riscv32],
    }
}

/// Checks that `path` is an object file the board can run.
///
/// # Errors
///
/// - [`ConfigError::WorkloadMissing`] if `path` is not a regular file.
/// - [`ConfigError::WorkloadUnreadable`] if it cannot be read or parsed.
/// - [`ConfigError::WorkloadArchMismatch`] if it targets another architecture.
pub fn check_workload(path: &Path, isa: Isa) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::WorkloadMissing(path.to_path_buf()));
    }
    let unreadable = |reason: String| ConfigError::WorkloadUnreadable {
        path: path.to_path_buf(),
        reason,
    };
    let data = fs::read(path).map_err(|e| unreadable(e.to_string()))?;
    let file = object::File::parse(&*data).map_err(|e| unreadable(e.to_string()))?;

    let arch = file.architecture();
    if !accepted_architectures(isa).contains(&arch) {
        return Err(ConfigError::WorkloadArchMismatch {
            path: path.to_path_buf(),
            found: format!("{arch:?}"),
            expected: isa,
        });
    }
    tracing::debug!(path = %path.display(), ?arch, kind = ?file.kind(), "workload accepted");
    Ok(())
}
