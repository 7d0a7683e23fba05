//! Core Settings struct and implementations.

use super::{EngineSource, IconSource, ReleaseArtifact, Variant};
use crate::provision::platform::macos::BundleLayout;
use std::path::{Path, PathBuf};

/// Immutable configuration for one provisioning run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder) and passed by
/// reference to every stage.
///
/// # Examples
///
/// ```no_run
/// use ags_provision::provision::{SettingsBuilder, Variant};
///
/// # fn example() -> ags_provision::provision::Result<()> {
/// let settings = SettingsBuilder::new()
///     .variant(Variant::Basic)
///     .install_root("/Applications")
///     .build()?;
/// assert!(settings.install_target().ends_with("AGS Editor"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    pub(super) variant: Variant,
    pub(super) install_root: PathBuf,
    pub(super) app_name: String,
    pub(super) bundle_identifier: String,
    pub(super) release: ReleaseArtifact,
    pub(super) icon: IconSource,
    pub(super) engine: EngineSource,
    pub(super) wine_prefix: Option<PathBuf>,
    pub(super) runtime_framework: String,
    pub(super) scratch_dir: PathBuf,
    pub(super) skip_confirm: bool,
}

impl Settings {
    /// Selected variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Parent directory of the install target.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Application display name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Bundle identifier for the manifest.
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle_identifier
    }

    /// Release archive to install.
    pub fn release(&self) -> &ReleaseArtifact {
        &self.release
    }

    /// Icon source and pinned digest.
    pub fn icon(&self) -> &IconSource {
        &self.icon
    }

    /// Engine build inputs.
    pub fn engine(&self) -> &EngineSource {
        &self.engine
    }

    /// Wine prefix for winetricks; `None` uses Wine's default.
    pub fn wine_prefix(&self) -> Option<&Path> {
        self.wine_prefix.as_deref()
    }

    /// winetricks verb for the runtime framework.
    pub fn runtime_framework(&self) -> &str {
        &self.runtime_framework
    }

    /// Scratch directory for the engine checkout.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Whether the confirmation prompt is skipped.
    pub fn skip_confirm(&self) -> bool {
        self.skip_confirm
    }

    /// Directory that is wiped and repopulated on every run.
    ///
    /// `<root>/<name>` for the basic variant, `<root>/<name>.app` otherwise.
    pub fn install_target(&self) -> PathBuf {
        if self.variant.assembles_bundle() {
            self.install_root.join(format!("{}.app", self.app_name))
        } else {
            self.install_root.join(&self.app_name)
        }
    }

    /// Bundle layout, for variants that produce one.
    pub fn bundle_layout(&self) -> Option<BundleLayout> {
        self.variant
            .assembles_bundle()
            .then(|| BundleLayout::new(self.install_target()))
    }

    /// Where the release archive is extracted.
    pub fn extract_dir(&self) -> PathBuf {
        match self.bundle_layout() {
            Some(layout) => layout.app_dir(),
            None => self.install_target(),
        }
    }

    /// Where the engine binary is installed.
    pub fn engine_dir(&self) -> PathBuf {
        match self.bundle_layout() {
            Some(layout) => layout.engine_dir(),
            None => self.install_target().join("engine"),
        }
    }
}
