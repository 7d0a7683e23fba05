//! .NET runtime install through winetricks.

use std::path::Path;

use super::compat::CompatRuntime;
use crate::provision::{FailurePolicy, Host, Invocation, Result, StepOutcome};

/// `WINE=<wine> [WINEPREFIX=<prefix>] winetricks -q <framework>`
pub fn framework_invocation(
    runtime: &CompatRuntime,
    framework: &str,
    prefix: Option<&Path>,
) -> Invocation {
    let mut invocation = Invocation::new(&runtime.winetricks)
        .args(["-q", framework])
        .env("WINE", runtime.wine.as_os_str());
    if let Some(prefix) = prefix {
        invocation = invocation.env("WINEPREFIX", prefix.as_os_str());
    }
    invocation
}

/// Installs the runtime framework into the Wine prefix.
///
/// Never fatal: winetricks often exits non-zero for frameworks that are
/// already present. Returns `true` when the install reported success.
pub async fn install_runtime_framework(
    host: &Host<'_>,
    runtime: &CompatRuntime,
    framework: &str,
    prefix: Option<&Path>,
) -> Result<bool> {
    host.reporter.progress(&format!(
        "Installing {framework} with winetricks (this can take a while)..."
    ));
    let installed = StepOutcome::classify(
        host.run(&framework_invocation(runtime, framework, prefix))
            .await,
        FailurePolicy::Warn,
    )
    .settle(&format!("winetricks {framework}"), host.reporter)?;
    if installed {
        host.reporter.success(&format!("Installed {framework}"));
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn invocation_carries_wine_environment() {
        let runtime = CompatRuntime {
            wine: "/opt/homebrew/bin/wine".into(),
            winetricks: "/opt/homebrew/bin/winetricks".into(),
        };
        let inv = framework_invocation(&runtime, "dotnet48", None);
        assert_eq!(inv.to_string(), "winetricks -q dotnet48");
        assert_eq!(
            inv.env_value("WINE"),
            Some(OsStr::new("/opt/homebrew/bin/wine"))
        );
        assert_eq!(inv.env_value("WINEPREFIX"), None);

        let inv = framework_invocation(&runtime, "dotnet48", Some(Path::new("/tmp/prefix")));
        assert_eq!(inv.env_value("WINEPREFIX"), Some(OsStr::new("/tmp/prefix")));
    }
}
