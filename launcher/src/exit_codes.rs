//! Stable exit codes for the launcher binary.

/// Every stage ran (the application's own exit status does not matter).
pub const OK: i32 = 0;
/// A fatal stage (interpreter check or dependency install) failed.
pub const ABORTED: i32 = 1;
/// The config file could not be read or failed validation.
pub const INVALID: i32 = 2;
