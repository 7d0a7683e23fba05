//! macOS `.app` bundle construction.
//!
//! ```text
//! AGS Editor.app/
//! └── Contents/
//!     ├── Info.plist
//!     ├── MacOS/ags-launcher
//!     └── Resources/
//!         ├── AppIcon.icns
//!         ├── ags/        (extracted release)
//!         └── engine/ags  (advanced variant)
//! ```

pub mod app;
pub mod icon;
pub mod launcher;
pub mod manifest;

use std::path::{Path, PathBuf};

use crate::provision::settings::defaults;

pub use app::{AssembledBundle, assemble_bundle};

/// Paths inside an application bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
}

impl BundleLayout {
    /// Layout rooted at `root` (the `.app` directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The `.app` directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contents(&self) -> PathBuf {
        self.root.join("Contents")
    }

    pub fn info_plist(&self) -> PathBuf {
        self.contents().join("Info.plist")
    }

    pub fn macos_dir(&self) -> PathBuf {
        self.contents().join("MacOS")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.contents().join("Resources")
    }

    /// Launcher script named by `CFBundleExecutable`.
    pub fn launcher(&self) -> PathBuf {
        self.macos_dir().join(defaults::LAUNCHER_NAME)
    }

    /// Compiled icon container named by `CFBundleIconFile`.
    pub fn icon_file(&self) -> PathBuf {
        self.resources_dir()
            .join(format!("{}.icns", defaults::ICON_NAME))
    }

    /// Extracted release.
    pub fn app_dir(&self) -> PathBuf {
        self.resources_dir().join("ags")
    }

    /// Native engine binary directory.
    pub fn engine_dir(&self) -> PathBuf {
        self.resources_dir().join("engine")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_follows_bundle_convention() {
        let layout = BundleLayout::new("/Users/me/Applications/AGS Editor.app");
        assert_eq!(
            layout.info_plist(),
            Path::new("/Users/me/Applications/AGS Editor.app/Contents/Info.plist")
        );
        assert_eq!(
            layout.launcher(),
            Path::new("/Users/me/Applications/AGS Editor.app/Contents/MacOS/ags-launcher")
        );
        assert_eq!(
            layout.icon_file(),
            Path::new("/Users/me/Applications/AGS Editor.app/Contents/Resources/AppIcon.icns")
        );
        assert!(layout.app_dir().starts_with(layout.resources_dir()));
        assert!(layout.engine_dir().starts_with(layout.resources_dir()));
    }
}
