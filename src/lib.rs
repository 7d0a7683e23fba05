//! Provisioner for the Adventure Game Studio editor on macOS.
//!
//! Installs Homebrew, Wine and winetricks, the .NET runtime the editor
//! needs, then downloads the editor release and (depending on the variant)
//! wraps it in a `.app` bundle and builds the native engine from source.
//! Every run replaces the previous install.
//!
//! It can be used both as a CLI tool and as a library dependency; see
//! [`provision::Provisioner`].

pub mod cli;
pub mod error;
pub mod provision;

// Re-export commonly used types
pub use error::{AppError, CliError, Result};
