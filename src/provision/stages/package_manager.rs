//! Homebrew: presence, bootstrap, self-update and package installs.
//!
//! Everything else in the pipeline installs through the [`PackageManager`]
//! handle returned by [`ensure_package_manager`].

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::provision::{
    CommandOutput, Error, FailurePolicy, Host, Invocation, Result, StepOutcome,
    pipeline::tool_detection,
    settings::defaults,
};

/// Kind of Homebrew package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageKind {
    /// Command-line formula.
    Formula,
    /// Application cask.
    Cask,
}

impl PackageKind {
    fn flag(self) -> &'static str {
        match self {
            PackageKind::Formula => "--formula",
            PackageKind::Cask => "--cask",
        }
    }
}

/// A package to install.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    /// Formula or cask name.
    pub name: String,
    /// Formula or cask.
    pub kind: PackageKind,
    /// Extra `brew install` flags.
    pub install_args: Vec<String>,
}

impl Package {
    /// A formula with no extra flags.
    pub fn formula(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PackageKind::Formula,
            install_args: Vec::new(),
        }
    }

    /// A cask installed without the quarantine attribute.
    pub fn cask(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PackageKind::Cask,
            install_args: vec!["--no-quarantine".to_string()],
        }
    }
}

/// Handle to a resolved `brew` executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageManager {
    brew: PathBuf,
}

impl PackageManager {
    /// Wraps a resolved `brew` path.
    pub fn new(brew: impl Into<PathBuf>) -> Self {
        Self { brew: brew.into() }
    }

    /// `brew update`
    pub fn update_invocation(&self) -> Invocation {
        Invocation::new(&self.brew).arg("update")
    }

    /// `brew list --formula|--cask -1`
    pub fn list_invocation(&self, kind: PackageKind) -> Invocation {
        Invocation::new(&self.brew)
            .args(["list", kind.flag(), "-1"])
            .capture_output()
    }

    /// `brew install [--cask] [flags] <name>`
    pub fn install_invocation(&self, package: &Package) -> Invocation {
        let mut invocation = Invocation::new(&self.brew).arg("install");
        if package.kind == PackageKind::Cask {
            invocation = invocation.arg("--cask");
        }
        invocation
            .args(package.install_args.iter().cloned())
            .arg(package.name.as_str())
    }

    /// Names of installed packages of `kind`.
    pub async fn installed(&self, host: &Host<'_>, kind: PackageKind) -> Result<BTreeSet<String>> {
        let invocation = self.list_invocation(kind);
        let output = host.run(&invocation).await?;
        if !output.success() {
            return Err(Error::CommandStatus {
                command: invocation.to_string(),
                reason: output.failure_reason(),
            });
        }
        Ok(parse_package_list(&output.stdout))
    }

    /// True when `package` is installed.
    pub async fn is_installed(&self, host: &Host<'_>, package: &Package) -> Result<bool> {
        Ok(self
            .installed(host, package.kind)
            .await?
            .contains(&package.name))
    }

    /// Runs `brew install` once and returns its output.
    pub async fn install(&self, host: &Host<'_>, package: &Package) -> Result<CommandOutput> {
        host.reporter
            .progress(&format!("Installing {} with Homebrew...", package.name));
        host.run(&self.install_invocation(package)).await
    }

    /// Installs `package` unless it is already present.
    ///
    /// Install failure is fatal. Returns `true` if an install happened.
    pub async fn ensure(&self, host: &Host<'_>, package: &Package) -> Result<bool> {
        if self.is_installed(host, package).await? {
            log::debug!("{} already installed", package.name);
            return Ok(false);
        }
        StepOutcome::classify(self.install(host, package).await, FailurePolicy::Halt)
            .settle(&format!("brew install {}", package.name), host.reporter)?;
        host.reporter.success(&format!("Installed {}", package.name));
        Ok(true)
    }
}

/// Parses `brew list -1` output into a set of names.
pub fn parse_package_list(stdout: &str) -> BTreeSet<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Locates `brew` in its standard prefixes or on `PATH`.
pub fn locate_brew(host: &Host<'_>) -> Option<PathBuf> {
    tool_detection::locate(host.locator, defaults::HOMEBREW_CANDIDATES, &["brew"])
}

/// Ensures Homebrew is installed and current.
///
/// Present: run `brew update`. Absent: download the official installer and
/// run it unattended. Either failing aborts the run.
pub async fn ensure_package_manager(host: &Host<'_>) -> Result<PackageManager> {
    if let Some(brew) = locate_brew(host) {
        host.reporter
            .progress(&format!("Homebrew found at {}, updating...", brew.display()));
        let manager = PackageManager::new(brew);
        StepOutcome::classify(
            host.run(&manager.update_invocation()).await,
            FailurePolicy::Halt,
        )
        .settle("brew update", host.reporter)?;
        host.reporter.success("Homebrew is up to date");
        return Ok(manager);
    }

    host.reporter
        .progress("Homebrew not found, running the official installer...");
    bootstrap(host).await?;

    let brew = locate_brew(host).ok_or_else(|| Error::ExecutableNotFound {
        names: vec!["brew".to_string()],
        probed: defaults::HOMEBREW_CANDIDATES.len(),
    })?;
    host.reporter
        .success(&format!("Homebrew installed at {}", brew.display()));
    Ok(PackageManager::new(brew))
}

/// Downloads and runs the Homebrew installer script.
async fn bootstrap(host: &Host<'_>) -> Result<()> {
    // Deleted when `script` drops, on every exit path.
    let script = tempfile::Builder::new()
        .prefix("homebrew-install-")
        .suffix(".sh")
        .tempfile()
        .map_err(Error::IoError)?
        .into_temp_path();

    host.transport
        .download(defaults::HOMEBREW_INSTALL_URL, &script)
        .await?;

    let invocation = Invocation::new("/bin/bash")
        .arg(script.as_os_str())
        .env("NONINTERACTIVE", "1");

    StepOutcome::classify(host.run(&invocation).await, FailurePolicy::Halt)
        .settle("Homebrew installer", host.reporter)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parsing_ignores_blank_lines() {
        let set = parse_package_list("git\n  cmake \n\nsdl2\n");
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["cmake".to_string(), "git".to_string(), "sdl2".to_string()]
        );
    }

    #[test]
    fn cask_install_command_line() {
        let brew = PackageManager::new("/opt/homebrew/bin/brew");
        let inv = brew.install_invocation(&Package::cask("wine-stable"));
        assert_eq!(
            inv.to_string(),
            "brew install --cask --no-quarantine wine-stable"
        );
        let inv = brew.install_invocation(&Package::formula("winetricks"));
        assert_eq!(inv.to_string(), "brew install winetricks");
        assert_eq!(
            brew.list_invocation(PackageKind::Cask).to_string(),
            "brew list --cask -1"
        );
    }
}
