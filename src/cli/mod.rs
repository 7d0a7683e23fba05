//! Command line interface for the provisioner.
//!
//! Parses arguments, layers configuration, asks for confirmation and runs
//! the [`Provisioner`] against the real host.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use std::io::IsTerminal;

use inquire::Confirm;

use crate::error::{CliError, Result};
use crate::provision::{
    Host, InstallReport, Provisioner, Settings,
    host::{HttpTransport, SystemLocator, SystemRunner},
    settings::{FileConfig, defaults},
};

/// Exit status when the user declines the prompt.
pub const EXIT_DECLINED: i32 = 1;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs with already-parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let file = FileConfig::discover(args.config.as_deref())?;
    let settings = args.settings_builder().merge_file(&file).build()?;
    let output = OutputManager::new(args.quiet);

    print_plan(&output, &settings);
    if !settings.skip_confirm() && !std::io::stdin().is_terminal() {
        return Err(CliError::NotInteractive {
            env: defaults::SKIP_CONFIRM_ENV,
        }
        .into());
    }
    if !settings.skip_confirm() && !confirm().await? {
        let _ = output.warn("Cancelled, nothing was changed");
        return Ok(EXIT_DECLINED);
    }

    let transport = HttpTransport::new();
    let host = Host::new(&SystemRunner, &transport, &SystemLocator, &output);
    let report = Provisioner::new(&settings, host).run().await?;

    print_summary(&output, &settings, &report);
    Ok(0)
}

fn print_plan(output: &OutputManager, settings: &Settings) {
    let _ = output.section(&format!(
        "Installing {} ({} variant)",
        settings.app_name(),
        settings.variant()
    ));
    let _ = output.indent(&format!("release:  {}", settings.release().url()));
    let _ = output.indent(&format!(
        "target:   {} (replaced if present)",
        settings.install_target().display()
    ));
    if settings.variant().builds_engine() {
        let _ = output.indent(&format!("engine:   {}", settings.engine().repository));
    }
}

/// Asks on the blocking pool so the runtime keeps polling Ctrl-C.
async fn confirm() -> Result<bool> {
    let answer = tokio::task::spawn_blocking(|| {
        Confirm::new("Proceed with installation?")
            .with_default(true)
            .with_help_message(&format!(
                "Set {}=1 or pass --yes to skip this prompt",
                defaults::SKIP_CONFIRM_ENV
            ))
            .prompt()
    })
    .await
    .map_err(|e| CliError::TaskFailed {
        task: "prompt",
        reason: e.to_string(),
    })??;
    Ok(answer)
}

fn print_summary(output: &OutputManager, settings: &Settings, report: &InstallReport) {
    let _ = output.section("Done");
    let _ = output.success(&format!(
        "{} installed at {}",
        settings.app_name(),
        report.install_target.display()
    ));
    let _ = output.indent(&format!("wine:     {}", report.runtime.wine.display()));
    if settings.variant().assembles_bundle() {
        let icon = if report.icon { "custom" } else { "default" };
        let _ = output.indent(&format!("icon:     {icon}"));
    }
    if let Some(engine) = &report.engine {
        let _ = output.indent(&format!("engine:   {}", engine.display()));
    }
    if !report.warnings.is_empty() {
        let _ = output.warn(&format!(
            "finished with {} warning(s), see above",
            report.warnings.len()
        ));
    }
}
