//! Builder for constructing Settings.

use super::{EngineSource, FileConfig, IconSource, ReleaseArtifact, Settings, Variant, defaults};
use crate::provision::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for [`Settings`].
///
/// Every field has a default; [`build`](Self::build) validates the result.
/// Release, icon and engine sources are fixed constants for users, but can
/// be overridden here so tests can point the pipeline at local fixtures.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    variant: Option<Variant>,
    install_root: Option<PathBuf>,
    app_name: Option<String>,
    release_url: Option<String>,
    entry_point: Option<String>,
    icon_url: Option<String>,
    icon_sha256: Option<String>,
    engine_repository: Option<String>,
    wine_prefix: Option<PathBuf>,
    scratch_dir: Option<PathBuf>,
    skip_confirm: Option<bool>,
}

impl SettingsBuilder {
    /// Creates a builder with all defaults.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the variant. Default: [`Variant::Bundle`].
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the parent directory of the install target. Default: `~/Applications`.
    pub fn install_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.install_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application display name. Default: `AGS Editor`.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Overrides the release archive URL.
    pub fn release_url(mut self, url: impl Into<String>) -> Self {
        self.release_url = Some(url.into());
        self
    }

    /// Overrides the entry-point executable name.
    pub fn entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = Some(name.into());
        self
    }

    /// Overrides the icon URL and its pinned digest.
    pub fn icon(mut self, url: impl Into<String>, sha256: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self.icon_sha256 = Some(sha256.into());
        self
    }

    /// Overrides the engine repository URL.
    pub fn engine_repository(mut self, url: impl Into<String>) -> Self {
        self.engine_repository = Some(url.into());
        self
    }

    /// Sets the Wine prefix used by winetricks.
    pub fn wine_prefix<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.wine_prefix = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the scratch directory for the engine checkout.
    pub fn scratch_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.scratch_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips the confirmation prompt.
    pub fn skip_confirm(mut self, skip: bool) -> Self {
        self.skip_confirm = Some(skip);
        self
    }

    /// Fills fields not already set from a configuration file.
    pub fn merge_file(mut self, file: &FileConfig) -> Self {
        if self.variant.is_none() {
            self.variant = file.variant;
        }
        if self.install_root.is_none() {
            self.install_root = file.install_root.clone();
        }
        if self.wine_prefix.is_none() {
            self.wine_prefix = file.wine_prefix.clone();
        }
        if self.scratch_dir.is_none() {
            self.scratch_dir = file.scratch_dir.clone();
        }
        if self.skip_confirm.is_none() {
            self.skip_confirm = file.skip_confirm;
        }
        self
    }

    /// Validates and builds the settings.
    pub fn build(self) -> Result<Settings> {
        let install_root = match self.install_root {
            Some(root) => root,
            None => defaults::default_install_root().ok_or_else(|| {
                Error::Settings("cannot determine home directory for ~/Applications".into())
            })?,
        };
        if install_root.as_os_str().is_empty() {
            return Err(Error::Settings("install root cannot be empty".into()));
        }

        let app_name = self.app_name.unwrap_or_else(|| defaults::APP_NAME.to_string());
        if app_name.trim().is_empty() || app_name.contains('/') {
            return Err(Error::Settings(format!("invalid application name: {app_name:?}")));
        }

        let release = ReleaseArtifact::new(
            self.release_url.as_deref().unwrap_or(defaults::RELEASE_URL),
            self.entry_point
                .unwrap_or_else(|| defaults::ENTRY_POINT.to_string()),
        )?;

        let icon = IconSource::new(
            self.icon_url.unwrap_or_else(|| defaults::ICON_URL.to_string()),
            self.icon_sha256.as_deref().unwrap_or(defaults::ICON_SHA256),
        )?;

        let engine = EngineSource {
            repository: self
                .engine_repository
                .unwrap_or_else(|| defaults::ENGINE_REPOSITORY.to_string()),
            binary: defaults::ENGINE_BINARY.to_string(),
            build_packages: defaults::BUILD_PACKAGES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        };

        Ok(Settings {
            variant: self.variant.unwrap_or_default(),
            install_root,
            app_name,
            bundle_identifier: defaults::BUNDLE_IDENTIFIER.to_string(),
            release,
            icon,
            engine,
            wine_prefix: self.wine_prefix,
            runtime_framework: defaults::RUNTIME_FRAMEWORK.to_string(),
            scratch_dir: self.scratch_dir.unwrap_or_else(defaults::default_scratch_dir),
            skip_confirm: self.skip_confirm.unwrap_or(false),
        })
    }
}
