//! Bundle finalization: quarantine removal and ad-hoc code signing.
//!
//! Both steps are best-effort. An unsigned or quarantined bundle still runs,
//! it just costs the user an extra Gatekeeper prompt.

use std::path::Path;

use crate::provision::{FailurePolicy, Host, Invocation, Result, StepOutcome};

/// Extended attribute set by macOS on downloaded files.
pub const QUARANTINE_ATTRIBUTE: &str = "com.apple.quarantine";

/// Ad-hoc signing identity understood by `codesign`.
pub const AD_HOC_IDENTITY: &str = "-";

/// Outcome of finalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Finalization {
    /// Quarantine attribute cleared.
    pub quarantine_cleared: bool,
    /// Ad-hoc signature applied.
    pub signed: bool,
}

/// `xattr -dr com.apple.quarantine <bundle>`
pub fn clear_quarantine_invocation(bundle: &Path) -> Invocation {
    Invocation::new("xattr")
        .args(["-dr", QUARANTINE_ATTRIBUTE])
        .arg(bundle)
        .capture_output()
}

/// `codesign --force --deep --sign - <bundle>`
pub fn ad_hoc_sign_invocation(bundle: &Path) -> Invocation {
    Invocation::new("codesign")
        .args(["--force", "--deep", "--sign", AD_HOC_IDENTITY])
        .arg(bundle)
        .capture_output()
}

/// Clears quarantine and applies an ad-hoc signature, swallowing failures.
pub async fn finalize_bundle(host: &Host<'_>, bundle: &Path) -> Result<Finalization> {
    host.reporter
        .progress(&format!("Finalizing {}", bundle.display()));

    let quarantine = StepOutcome::classify(
        host.run(&clear_quarantine_invocation(bundle)).await,
        FailurePolicy::Warn,
    )
    .settle("clearing quarantine attribute", host.reporter)?;

    let signed = StepOutcome::classify(
        host.run(&ad_hoc_sign_invocation(bundle)).await,
        FailurePolicy::Warn,
    )
    .settle("ad-hoc code signing", host.reporter)?;

    if signed {
        log::info!("✓ Ad-hoc signed {}", bundle.display());
    }

    Ok(Finalization {
        quarantine_cleared: quarantine,
        signed,
    })
}
