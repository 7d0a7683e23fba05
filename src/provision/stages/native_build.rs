//! Engine checkout, configure, build and install.

use std::path::{Path, PathBuf};

use super::package_manager::{Package, PackageManager};
use crate::provision::{
    FailurePolicy, Host, Invocation, Result, Settings, StepOutcome,
    pipeline::tool_detection,
    settings::{EngineSource, defaults},
    utils::fs::{self, RemoveOnDrop},
};

/// Build configuration passed to CMake.
pub const BUILD_TYPE: &str = "Release";

/// Resolves a build tool from the Homebrew prefixes or `PATH`.
///
/// Falls back to the bare name so the child's own `PATH` lookup reports the
/// failure.
pub fn build_tool(host: &Host<'_>, name: &str) -> PathBuf {
    tool_detection::locate(host.locator, &defaults::brew_bin_candidates(name), &[name])
        .unwrap_or_else(|| PathBuf::from(name))
}

/// `git clone --depth=1 <repository> <dest>`
pub fn clone_invocation(git: &Path, repository: &str, dest: &Path) -> Invocation {
    Invocation::new(git)
        .args(["clone", "--depth=1", repository])
        .arg(dest)
}

/// `cmake -S <source> -B <source>/build -DCMAKE_BUILD_TYPE=Release`
pub fn configure_invocation(cmake: &Path, source: &Path) -> Invocation {
    Invocation::new(cmake)
        .arg("-S")
        .arg(source)
        .arg("-B")
        .arg(source.join("build"))
        .arg(format!("-DCMAKE_BUILD_TYPE={BUILD_TYPE}"))
        .current_dir(source)
}

/// `cmake --build <source>/build --config Release`
pub fn build_invocation(cmake: &Path, source: &Path) -> Invocation {
    Invocation::new(cmake)
        .arg("--build")
        .arg(source.join("build"))
        .args(["--config", BUILD_TYPE])
        .current_dir(source)
}

/// Installs the toolchain, builds the engine from a fresh shallow clone and
/// copies the binary into the install target.
///
/// The scratch checkout is removed on every exit path.
pub async fn build_engine(
    host: &Host<'_>,
    manager: &PackageManager,
    settings: &Settings,
) -> Result<PathBuf> {
    let engine = settings.engine();
    ensure_toolchain(host, manager, engine).await?;

    let scratch = settings.scratch_dir();
    fs::remove_dir_all(scratch).await?;
    if let Some(parent) = scratch.parent() {
        fs::create_dir_all(parent, false).await?;
    }
    let checkout = RemoveOnDrop::new(scratch);

    host.reporter
        .progress(&format!("Cloning {}", engine.repository));
    let git = build_tool(host, defaults::VCS_PACKAGE);
    StepOutcome::classify(
        host.run(&clone_invocation(&git, &engine.repository, checkout.path()))
            .await,
        FailurePolicy::Halt,
    )
    .settle("git clone", host.reporter)?;

    let cmake = build_tool(host, "cmake");
    host.reporter.progress("Configuring engine build...");
    StepOutcome::classify(
        host.run(&configure_invocation(&cmake, checkout.path())).await,
        FailurePolicy::Halt,
    )
    .settle("cmake configure", host.reporter)?;

    host.reporter.progress("Building engine...");
    StepOutcome::classify(
        host.run(&build_invocation(&cmake, checkout.path())).await,
        FailurePolicy::Halt,
    )
    .settle("cmake build", host.reporter)?;

    let built = checkout.path().join("build").join(&engine.binary);
    let installed = settings.engine_dir().join(&engine.binary);
    fs::copy_file(&built, &installed).await?;
    fs::make_executable(&installed).await?;

    drop(checkout);
    host.reporter
        .success(&format!("Engine installed at {}", installed.display()));
    Ok(installed)
}

/// Installs git and every build formula, each failure fatal.
async fn ensure_toolchain(
    host: &Host<'_>,
    manager: &PackageManager,
    engine: &EngineSource,
) -> Result<()> {
    manager
        .ensure(host, &Package::formula(defaults::VCS_PACKAGE))
        .await?;
    for name in &engine.build_packages {
        manager.ensure(host, &Package::formula(name.as_str())).await?;
    }
    Ok(())
}
