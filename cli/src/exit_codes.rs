//! Stable process exit codes.

/// Normal end of session (end of input, Ctrl-C) or `--show-config`.
pub const OK: u8 = 0;
/// Startup failed: configuration, unreadable log, or the operator refused
/// to clear a corrupted log.
pub const STARTUP_FAILED: u8 = 1;
/// The operator agreed to clear a corrupted log but the rewrite failed.
pub const REPAIR_FAILED: u8 = 2;
