//! I/O helpers for the launcher.

pub mod config;
pub mod console;
pub mod process;
pub mod steps;
