//! Provisioning pipeline for the AGS editor on macOS.
//!
//! The [`Provisioner`] runs these stages strictly in order, stopping at the
//! first fatal failure:
//!
//! 1. package manager (Homebrew present and updated)
//! 2. compatibility layer (Wine + winetricks, runtime path resolved)
//! 3. runtime framework (`winetricks -q dotnet48`, failures tolerated)
//! 4. artifact fetch (download, extract, replace install target)
//! 5. bundle assembly (`bundle` and `advanced` variants)
//! 6. native engine build (`advanced` variant)
//!
//! All side effects go through the capabilities bundled in [`Host`], so the
//! pipeline can be driven against fakes.
//!
//! # Module Organization
//!
//! - [`settings`] - immutable configuration and its builder
//! - [`host`] - command runner, transport and tool locator capabilities
//! - [`pipeline`] - the orchestrator plus shared helpers (checksums, signing, resolution)
//! - [`stages`] - one module per pipeline stage
//! - [`platform`] - macOS application bundle construction

pub mod error;
pub mod host;
pub mod outcome;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod settings;
pub mod stages;
pub mod utils;

use std::fmt;

pub use error::{Context, Error, ErrorExt, Result};
pub use host::{CommandOutput, CommandRunner, Host, Invocation, ToolLocator, Transport};
pub use outcome::{FailurePolicy, StepOutcome};
pub use pipeline::{InstallReport, Provisioner};
pub use report::Reporter;
pub use settings::{Settings, SettingsBuilder, Variant};

/// A stage of the provisioning pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Homebrew bootstrap or self-update.
    PackageManager,
    /// Wine and winetricks installation and runtime resolution.
    CompatibilityLayer,
    /// .NET framework installation inside the Wine prefix.
    RuntimeFramework,
    /// Release download and extraction.
    Artifact,
    /// `.app` bundle assembly and finalization.
    Bundle,
    /// Engine checkout, configure, build and install.
    NativeBuild,
}

impl Stage {
    /// Human-readable stage name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::PackageManager => "package manager",
            Stage::CompatibilityLayer => "compatibility layer",
            Stage::RuntimeFramework => "runtime framework",
            Stage::Artifact => "artifact fetch",
            Stage::Bundle => "bundle assembly",
            Stage::NativeBuild => "native build",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
