//! Local setup and launch of the Wine Dental Attendance App.
//!
//! The launcher checks for a Python interpreter, installs the app's
//! dependencies, seeds its database, then runs the app in the foreground until
//! it exits. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (stages, transitions, console text).
//! - **[`io`]**: Side-effecting operations (config file, processes, console).
//!
//! [`launch`] coordinates the two to implement the binary.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod launch;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
