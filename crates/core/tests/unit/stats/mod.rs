//! Tests for the statistics module.
