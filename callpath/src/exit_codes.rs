//! Stable exit codes for the `callpath` binary.

/// Batch completed.
pub const OK: i32 = 0;
/// Configuration could not be loaded or was invalid.
pub const INVALID: i32 = 1;
