//! Stable exit codes for the `setup-spark` binary.

/// Spark installed and environment exported.
pub const OK: i32 = 0;
/// Any failure; the step is marked failed.
pub const FAILED: i32 = 1;
