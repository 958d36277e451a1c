//! Common utility modules for shared functionality across the codebase.

pub mod names;
