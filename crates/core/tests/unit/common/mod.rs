//! Tests for shared types.

/// Error message tests.
pub mod error;
