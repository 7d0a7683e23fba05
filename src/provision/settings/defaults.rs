//! Fixed values baked into the provisioner.
//!
//! URLs, package names and checksums are compile-time constants; only the
//! install locations and the variant are configurable at run time.

use std::path::PathBuf;

/// Display name of the installed application.
pub const APP_NAME: &str = "AGS Editor";

/// `CFBundleIdentifier` of the generated bundle.
pub const BUNDLE_IDENTIFIER: &str = "org.adventuregamestudio.editor";

/// Official Homebrew bootstrap script.
pub const HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Homebrew `bin` directories on Apple Silicon and Intel Macs.
pub const BREW_BIN_DIRS: &[&str] = &["/opt/homebrew/bin", "/usr/local/bin"];

/// Where Homebrew puts `brew` itself.
pub const HOMEBREW_CANDIDATES: &[&str] = &["/opt/homebrew/bin/brew", "/usr/local/bin/brew"];

/// Install prefixes probed for the Wine binaries, in priority order.
pub const RUNTIME_PREFIXES: &[&str] = &[
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/Applications/Wine Stable.app/Contents/Resources/wine/bin",
];

/// Wine binary names, primary first.
pub const RUNTIME_NAMES: &[&str] = &["wine", "wine64"];

/// Preferred Wine cask.
pub const WINE_CASK: &str = "wine-stable";

/// Cask tried when the preferred one fails to install.
pub const WINE_FALLBACK_CASK: &str = "wine@staging";

/// Wine configuration helper.
pub const CONFIG_HELPER: &str = "winetricks";

/// winetricks verb for the .NET framework the editor needs.
pub const RUNTIME_FRAMEWORK: &str = "dotnet48";

/// Git tag of the pinned editor release.
pub const RELEASE_TAG: &str = "v3.6.1.26";

/// Release archive of the editor. The version is part of the file name.
pub const RELEASE_URL: &str =
    "https://github.com/adventuregamestudio/ags/releases/download/v3.6.1.26/AGS-3.6.1.26.zip";

/// Editor executable inside the release archive.
pub const ENTRY_POINT: &str = "AGSEditor.exe";

/// Source image for the bundle icon, read from the release tag so the
/// bytes behind [`ICON_SHA256`] cannot move.
pub const ICON_URL: &str = "https://raw.githubusercontent.com/adventuregamestudio/ags/v3.6.1.26/Editor/AGS.Editor/Resources/AGSEditor.png";

/// SHA-256 of [`ICON_URL`].
pub const ICON_SHA256: &str = "4f3c2b1d8e7a6f5c4b3a29180f7e6d5c4b3a291807f6e5d4c3b2a1908f7e6d5c";

/// Engine source repository.
pub const ENGINE_REPOSITORY: &str = "https://github.com/adventuregamestudio/ags.git";

/// Binary produced by the engine build.
pub const ENGINE_BINARY: &str = "ags";

/// Homebrew formulae needed to build the engine.
pub const BUILD_PACKAGES: &[&str] = &["cmake", "pkg-config", "sdl2"];

/// Version control package.
pub const VCS_PACKAGE: &str = "git";

/// `LSMinimumSystemVersion` of the generated bundle.
pub const MINIMUM_SYSTEM_VERSION: &str = "10.15";

/// `LSApplicationCategoryType` of the generated bundle.
pub const APP_CATEGORY: &str = "public.app-category.developer-tools";

/// Name of the launcher script in `Contents/MacOS`.
pub const LAUNCHER_NAME: &str = "ags-launcher";

/// Base name of the icon container in `Contents/Resources`.
pub const ICON_NAME: &str = "AppIcon";

/// Environment variable that suppresses the confirmation prompt.
pub const SKIP_CONFIRM_ENV: &str = "AGS_SKIP_CONFIRM";

/// Every `<prefix>/<name>` runtime candidate, prefixes outermost.
pub fn runtime_candidates() -> Vec<PathBuf> {
    RUNTIME_PREFIXES
        .iter()
        .flat_map(|prefix| {
            RUNTIME_NAMES
                .iter()
                .map(move |name| PathBuf::from(prefix).join(name))
        })
        .collect()
}

/// `<brew bin dir>/<name>` for each Homebrew prefix.
pub fn brew_bin_candidates(name: &str) -> Vec<PathBuf> {
    BREW_BIN_DIRS
        .iter()
        .map(|dir| PathBuf::from(dir).join(name))
        .collect()
}

/// Default parent directory for installs: `~/Applications`.
pub fn default_install_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Applications"))
}

/// Default scratch location for the engine checkout.
pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("ags-engine-src")
}
