//! # Workload Check Tests

use o3lab_core::common::ConfigError;
use o3lab_core::config::Isa;
use o3lab_core::sim::check_workload;

use crate::common::harness::write_file;

#[test]
fn test_missing_binary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mm_bench");
    assert!(matches!(
        check_workload(&path, Isa::X86),
        Err(ConfigError::WorkloadMissing(p)) if p == path
    ));
}

#[test]
fn test_directory_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        check_workload(dir.path(), Isa::X86),
        Err(ConfigError::WorkloadMissing(_))
    ));
}

#[test]
fn test_text_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "mm_bench", b"#!/bin/sh\necho hi\n");
    assert!(matches!(
        check_workload(&path, Isa::X86),
        Err(ConfigError::WorkloadUnreadable { .. })
    ));
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
#[test]
fn test_host_binary_matches_x86() {
    let exe = std::env::current_exe().unwrap();
    check_workload(&exe, Isa::X86).unwrap();
    match check_workload(&exe, Isa::Riscv) {
        Err(ConfigError::WorkloadArchMismatch { found, expected, .. }) => {
            assert_eq!(found, "X86_64");
            assert_eq!(expected, Isa::Riscv);
        }
        other => panic!("expected WorkloadArchMismatch, got {other:?}"),
    }
}

#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
#[test]
fn test_host_binary_matches_arm() {
    let exe = std::env::current_exe().unwrap();
    check_workload(&exe, Isa::Arm).unwrap();
    assert!(matches!(
        check_workload(&exe, Isa::X86),
        Err(ConfigError::WorkloadArchMismatch { .. })
    ));
}
