//! Command implementations for the charmbundle CLI

pub mod completions;
pub mod format;
pub mod helpers;
pub mod verify;
pub mod version;
