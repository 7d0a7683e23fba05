//! Main provisioning orchestration.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;

use super::signing::{Finalization, finalize_bundle};
use crate::provision::{
    Host, Reporter, Result, Settings, Stage,
    platform::macos::assemble_bundle,
    stages::{
        CompatRuntime, build_engine, ensure_compatibility_layer, ensure_package_manager,
        fetch_release, install_runtime_framework,
    },
};

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallReport {
    /// Directory that now holds the install.
    pub install_target: PathBuf,
    /// Wine and winetricks paths used.
    pub runtime: CompatRuntime,
    /// Whether the runtime framework install reported success.
    pub framework_installed: bool,
    /// Whether the custom icon was written (bundle variants only).
    pub icon: bool,
    /// Quarantine and signing results (bundle variants only).
    pub finalization: Option<Finalization>,
    /// Installed engine binary (advanced variant only).
    pub engine: Option<PathBuf>,
    /// Every tolerated failure, in order.
    pub warnings: Vec<String>,
}

/// Runs the provisioning stages in order.
///
/// Each stage starts only after the previous one succeeded. The first fatal
/// error stops the run and is returned tagged with its [`Stage`]; completed
/// stages are not rolled back.
///
/// # Examples
///
/// ```no_run
/// use ags_provision::provision::{
///     Host, Provisioner, SettingsBuilder,
///     host::{HttpTransport, SystemLocator, SystemRunner},
///     report::LogReporter,
/// };
///
/// # async fn example() -> ags_provision::provision::Result<()> {
/// let settings = SettingsBuilder::new().build()?;
/// let transport = HttpTransport::new();
/// let host = Host::new(&SystemRunner, &transport, &SystemLocator, &LogReporter);
/// let report = Provisioner::new(&settings, host).run().await?;
/// println!("installed to {}", report.install_target.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Provisioner<'a> {
    settings: &'a Settings,
    host: Host<'a>,
}

impl<'a> Provisioner<'a> {
    pub fn new(settings: &'a Settings, host: Host<'a>) -> Self {
        Self { settings, host }
    }

    /// Runs every stage for the configured variant.
    pub async fn run(&self) -> Result<InstallReport> {
        let recorder = WarningRecorder::new(self.host.reporter);
        let host = Host {
            reporter: &recorder,
            ..self.host
        };
        let settings = self.settings;

        let manager = in_stage(&host, Stage::PackageManager, ensure_package_manager(&host)).await?;

        let runtime = in_stage(
            &host,
            Stage::CompatibilityLayer,
            ensure_compatibility_layer(&host, &manager),
        )
        .await?;

        let framework_installed = in_stage(
            &host,
            Stage::RuntimeFramework,
            install_runtime_framework(
                &host,
                &runtime,
                settings.runtime_framework(),
                settings.wine_prefix(),
            ),
        )
        .await?;

        in_stage(&host, Stage::Artifact, fetch_release(&host, settings)).await?;

        let mut icon = false;
        let mut bundle_root = None;
        if let Some(layout) = settings.bundle_layout() {
            let assembled =
                in_stage(&host, Stage::Bundle, assemble_bundle(&host, settings, layout)).await?;
            icon = assembled.icon;
            bundle_root = Some(assembled.layout.root().to_path_buf());
        }

        let engine = if settings.variant().builds_engine() {
            Some(
                in_stage(
                    &host,
                    Stage::NativeBuild,
                    build_engine(&host, &manager, settings),
                )
                .await?,
            )
        } else {
            None
        };

        // Signing covers the engine binary too, so it runs last.
        let finalization = match &bundle_root {
            Some(root) => Some(
                finalize_bundle(&host, root)
                    .await
                    .map_err(|e| e.in_stage(Stage::Bundle))?,
            ),
            None => None,
        };

        Ok(InstallReport {
            install_target: settings.install_target(),
            runtime,
            framework_installed,
            icon,
            finalization,
            engine,
            warnings: recorder.into_warnings(),
        })
    }
}

/// Announces `stage`, awaits it and tags any error with it.
async fn in_stage<T>(
    host: &Host<'_>,
    stage: Stage,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    host.reporter.section(stage.name());
    log::debug!("entering stage: {stage}");
    work.await.map_err(|e| e.in_stage(stage))
}

/// Forwards to another reporter and keeps a copy of each warning.
struct WarningRecorder<'a> {
    inner: &'a dyn Reporter,
    warnings: Mutex<Vec<String>>,
}

impl<'a> WarningRecorder<'a> {
    fn new(inner: &'a dyn Reporter) -> Self {
        Self {
            inner,
            warnings: Mutex::new(Vec::new()),
        }
    }

    fn into_warnings(self) -> Vec<String> {
        self.warnings
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reporter for WarningRecorder<'_> {
    fn section(&self, title: &str) {
        self.inner.section(title)
    }
    fn progress(&self, message: &str) {
        self.inner.progress(message)
    }
    fn success(&self, message: &str) {
        self.inner.success(message)
    }
    fn warn(&self, message: &str) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(message.to_string());
        }
        self.inner.warn(message)
    }
}
