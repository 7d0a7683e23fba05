//! `Info.plist` generation.

use std::path::Path;

use serde::Serialize;

use crate::provision::{Result, Settings, settings::defaults, utils::fs};

/// Bundle version used when the release file name carries none.
pub const FALLBACK_VERSION: &str = "1.0";

/// Contents of `Contents/Info.plist`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BundleManifest {
    #[serde(rename = "CFBundleName")]
    pub name: String,
    #[serde(rename = "CFBundleDisplayName")]
    pub display_name: String,
    #[serde(rename = "CFBundleIdentifier")]
    pub identifier: String,
    #[serde(rename = "CFBundleVersion")]
    pub version: String,
    #[serde(rename = "CFBundleShortVersionString")]
    pub short_version: String,
    #[serde(rename = "CFBundleExecutable")]
    pub executable: String,
    #[serde(rename = "CFBundleIconFile")]
    pub icon_file: String,
    #[serde(rename = "CFBundlePackageType")]
    pub package_type: String,
    #[serde(rename = "LSMinimumSystemVersion")]
    pub minimum_system_version: String,
    #[serde(rename = "LSApplicationCategoryType")]
    pub category: String,
    #[serde(rename = "NSHighResolutionCapable")]
    pub high_resolution: bool,
}

impl BundleManifest {
    /// Fixed manifest for the configured bundle name and release.
    pub fn for_settings(settings: &Settings) -> Self {
        let version = settings
            .release()
            .version()
            .unwrap_or(FALLBACK_VERSION)
            .to_string();
        Self {
            name: settings.app_name().to_string(),
            display_name: settings.app_name().to_string(),
            identifier: settings.bundle_identifier().to_string(),
            short_version: version.clone(),
            version,
            executable: defaults::LAUNCHER_NAME.to_string(),
            icon_file: defaults::ICON_NAME.to_string(),
            package_type: "APPL".to_string(),
            minimum_system_version: defaults::MINIMUM_SYSTEM_VERSION.to_string(),
            category: defaults::APP_CATEGORY.to_string(),
            high_resolution: true,
        }
    }

    /// XML property list bytes.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        plist::to_writer_xml(&mut buffer, self)?;
        Ok(buffer)
    }

    /// Writes the manifest. Fails if `path` already exists.
    pub async fn write(&self, path: &Path) -> Result<()> {
        fs::write_new(path, &self.to_xml()?).await
    }
}
