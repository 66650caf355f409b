//! Pure launch logic: stages, transitions, console text. No I/O.

pub mod messages;
pub mod stage;
pub mod types;
pub mod version;
