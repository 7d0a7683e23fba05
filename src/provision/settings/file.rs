//! Optional TOML configuration file.
//!
//! ```toml
//! variant = "advanced"
//! install_root = "/Applications"
//! wine_prefix = "/Users/me/.wine-ags"
//! scratch_dir = "/tmp/ags-src"
//! skip_confirm = true
//! ```

use super::Variant;
use crate::provision::{Error, Result};
use std::path::{Path, PathBuf};

/// Values read from the configuration file. All fields are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Installation variant.
    #[serde(default)]
    pub variant: Option<Variant>,

    /// Parent directory of the install target.
    #[serde(default)]
    pub install_root: Option<PathBuf>,

    /// Wine prefix for winetricks.
    #[serde(default)]
    pub wine_prefix: Option<PathBuf>,

    /// Scratch directory for the engine checkout.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[serde(default)]
    pub skip_confirm: Option<bool>,
}

impl FileConfig {
    /// Default location: `<config_dir>/ags-provision/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ags-provision").join("config.toml"))
    }

    /// Parses configuration text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Settings(format!("invalid config file: {e}")))
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Settings(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Loads `path` if given, else the default file if it exists.
    ///
    /// An explicitly named file must exist; a missing default file is not an error.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(default) if default.is_file() => {
                    log::debug!("Loading config from {}", default.display());
                    Self::load(&default)
                }
                _ => Ok(Self::default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let cfg = FileConfig::parse(
            r#"
            variant = "advanced"
            install_root = "/Applications"
            wine_prefix = "/tmp/prefix"
            skip_confirm = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.variant, Some(Variant::Advanced));
        assert_eq!(cfg.install_root, Some(PathBuf::from("/Applications")));
        assert_eq!(cfg.wine_prefix, Some(PathBuf::from("/tmp/prefix")));
        assert_eq!(cfg.skip_confirm, Some(true));
        assert_eq!(cfg.scratch_dir, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = FileConfig::parse("release_url = \"https://evil\"").unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::discover(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
