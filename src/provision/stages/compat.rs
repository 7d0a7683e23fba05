//! Wine and winetricks installation, plus runtime path resolution.

use std::path::PathBuf;

use super::package_manager::{Package, PackageManager};
use crate::provision::{
    Error, FailurePolicy, Host, Result, StepOutcome,
    pipeline::tool_detection,
    settings::defaults,
};

/// Resolved compatibility-layer executables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompatRuntime {
    /// Wine binary used to run the editor.
    pub wine: PathBuf,
    /// winetricks binary used for runtime frameworks.
    pub winetricks: PathBuf,
}

/// Locates Wine: well-known prefixes first, then `PATH` (`wine`, then `wine64`).
pub fn locate_runtime(host: &Host<'_>) -> Option<PathBuf> {
    tool_detection::locate(
        host.locator,
        &defaults::runtime_candidates(),
        defaults::RUNTIME_NAMES,
    )
}

/// Locates winetricks in the Homebrew prefixes or on `PATH`.
pub fn locate_config_helper(host: &Host<'_>) -> Option<PathBuf> {
    tool_detection::locate(
        host.locator,
        &defaults::brew_bin_candidates(defaults::CONFIG_HELPER),
        &[defaults::CONFIG_HELPER],
    )
}

/// Ensures Wine and winetricks are installed and resolves their paths.
///
/// Wine install failures are tolerated; the run only aborts if no Wine
/// binary can be resolved afterwards. A failed winetricks install is fatal.
pub async fn ensure_compatibility_layer(
    host: &Host<'_>,
    manager: &PackageManager,
) -> Result<CompatRuntime> {
    if locate_runtime(host).is_none() {
        install_runtime(host, manager).await?;
    } else {
        log::debug!("Wine already present, skipping install");
    }

    let wine = locate_runtime(host).ok_or_else(|| Error::ExecutableNotFound {
        names: defaults::RUNTIME_NAMES.iter().map(|n| n.to_string()).collect(),
        probed: defaults::runtime_candidates().len(),
    })?;
    host.reporter
        .success(&format!("Using Wine at {}", wine.display()));

    let winetricks = ensure_config_helper(host, manager).await?;

    Ok(CompatRuntime { wine, winetricks })
}

/// Tries the preferred cask, then the fallback. Never fatal on its own.
async fn install_runtime(host: &Host<'_>, manager: &PackageManager) -> Result<bool> {
    let primary = Package::cask(defaults::WINE_CASK);
    let installed = StepOutcome::classify(
        manager.install(host, &primary).await,
        FailurePolicy::Warn,
    )
    .settle(&format!("brew install --cask {}", primary.name), host.reporter)?;
    if installed {
        return Ok(true);
    }

    let fallback = Package::cask(defaults::WINE_FALLBACK_CASK);
    host.reporter
        .progress(&format!("Falling back to {}", fallback.name));
    StepOutcome::classify(
        manager.install(host, &fallback).await,
        FailurePolicy::Warn,
    )
    .settle(&format!("brew install --cask {}", fallback.name), host.reporter)
}

/// Installs winetricks if it is not on the system, then resolves it.
async fn ensure_config_helper(host: &Host<'_>, manager: &PackageManager) -> Result<PathBuf> {
    if let Some(path) = locate_config_helper(host) {
        return Ok(path);
    }

    let helper = Package::formula(defaults::CONFIG_HELPER);
    StepOutcome::classify(manager.install(host, &helper).await, FailurePolicy::Halt)
        .settle(&format!("brew install {}", helper.name), host.reporter)?;

    locate_config_helper(host).ok_or_else(|| Error::ExecutableNotFound {
        names: vec![defaults::CONFIG_HELPER.to_string()],
        probed: defaults::BREW_BIN_DIRS.len(),
    })
}
