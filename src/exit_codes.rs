//! Exit code constants for the helm-v2-cleanup CLI.
//!
//! - 0: Success (including a declined confirmation and dry-run)
//! - 1: User error (bad args, bad settings, unreadable prompt)
//! - 2: Validation failure (conflicting cleanup options)
//! - 3: Cleanup failure (release lookup or removal failed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid settings, or prompt I/O failure.
pub const USER_ERROR: i32 = 1;

/// Validation failure: a named-release cleanup combined with other categories.
pub const VALIDATION_FAILURE: i32 = 2;

/// Cleanup failure: a release lookup or a removal against the cluster or disk failed.
pub const CLEANUP_FAILURE: i32 = 3;
