//! Assembles the `.app` bundle around an extracted release.

use super::{BundleLayout, icon, launcher, manifest::BundleManifest};
use crate::provision::{Host, Result, Settings, utils::fs};

/// A bundle whose manifest and launcher are in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledBundle {
    /// Bundle paths.
    pub layout: BundleLayout,
    /// Whether the custom icon was written.
    pub icon: bool,
}

/// Writes the manifest, launcher and (best-effort) icon.
///
/// The release must already be extracted into [`BundleLayout::app_dir`].
pub async fn assemble_bundle(
    host: &Host<'_>,
    settings: &Settings,
    layout: BundleLayout,
) -> Result<AssembledBundle> {
    host.reporter
        .progress(&format!("Assembling {}", layout.root().display()));

    fs::create_dir_all(&layout.macos_dir(), false).await?;
    fs::create_dir_all(&layout.resources_dir(), false).await?;

    BundleManifest::for_settings(settings)
        .write(&layout.info_plist())
        .await?;
    launcher::write_launcher(
        &layout.launcher(),
        settings.app_name(),
        settings.release().entry_point(),
        settings.wine_prefix(),
    )
    .await?;

    let icon = icon::install_icon(host, settings.icon(), &layout.icon_file()).await?;

    host.reporter
        .success(&format!("Bundle assembled at {}", layout.root().display()));
    Ok(AssembledBundle { layout, icon })
}
