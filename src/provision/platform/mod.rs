//! Platform-specific output formats.

pub mod macos;
