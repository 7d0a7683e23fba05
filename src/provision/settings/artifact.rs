//! Remote resources the provisioner fetches.

use crate::provision::{Error, Result};

/// Archive formats the fetcher can unpack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip`
    Zip,
    /// `.tar.gz` / `.tgz`
    TarGz,
}

impl ArchiveFormat {
    /// Detects the format from a file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else {
            None
        }
    }

    /// Suffix used for temporary download files.
    pub fn suffix(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::TarGz => ".tar.gz",
        }
    }
}

/// The versioned editor release.
///
/// Identified by its URL; the version is the part of the file name between
/// the first `-` and the archive extension (`AGS-3.6.1.26.zip` → `3.6.1.26`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseArtifact {
    url: url::Url,
    file_name: String,
    format: ArchiveFormat,
    entry_point: String,
}

impl ReleaseArtifact {
    /// Parses and validates a release URL.
    pub fn new(url: &str, entry_point: impl Into<String>) -> Result<Self> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::Settings(format!("invalid release URL {url}: {e}")))?;

        let file_name = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Settings(format!("release URL has no file name: {url}")))?
            .to_string();

        let format = ArchiveFormat::from_file_name(&file_name).ok_or_else(|| {
            Error::Settings(format!("unsupported release archive type: {file_name}"))
        })?;

        let entry_point = entry_point.into();
        if entry_point.is_empty() {
            return Err(Error::Settings("entry point name cannot be empty".into()));
        }

        Ok(Self {
            url: parsed,
            file_name,
            format,
            entry_point,
        })
    }

    /// Download URL.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Archive file name from the URL.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Archive format.
    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Editor executable expected at the root of the extracted tree.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Version embedded in the file name, if any.
    pub fn version(&self) -> Option<&str> {
        let stem = self.file_name.strip_suffix(self.format.suffix()).or_else(|| {
            // `.tgz` and mixed-case extensions
            self.file_name.rsplit_once('.').map(|(stem, _)| stem)
        })?;
        let (_, version) = stem.split_once('-')?;
        version
            .chars()
            .next()
            .filter(char::is_ascii_digit)
            .map(|_| version)
    }
}

/// Icon source image and its pinned digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconSource {
    /// Image URL.
    pub url: String,
    /// Lowercase hex SHA-256 of the image.
    pub sha256: String,
}

impl IconSource {
    /// Validates and normalizes the digest.
    pub fn new(url: impl Into<String>, sha256: &str) -> Result<Self> {
        let sha256 = sha256.trim().to_ascii_lowercase();
        if sha256.len() != 64 || !sha256.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Settings(format!(
                "icon digest must be 64 hex characters, got {sha256:?}"
            )));
        }
        Ok(Self {
            url: url.into(),
            sha256,
        })
    }
}

/// Engine source checkout and build inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSource {
    /// Git repository URL.
    pub repository: String,
    /// Name of the produced binary inside the build directory.
    pub binary: String,
    /// Homebrew formulae required to build.
    pub build_packages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::settings::defaults;

    #[test]
    fn default_release_parses() {
        let release = ReleaseArtifact::new(defaults::RELEASE_URL, defaults::ENTRY_POINT).unwrap();
        assert_eq!(release.file_name(), "AGS-3.6.1.26.zip");
        assert_eq!(release.format(), ArchiveFormat::Zip);
        assert_eq!(release.version(), Some("3.6.1.26"));
    }

    #[test]
    fn version_from_tarball() {
        let release =
            ReleaseArtifact::new("https://example.com/dl/AGS-3.5.0.tgz", "AGSEditor.exe").unwrap();
        assert_eq!(release.format(), ArchiveFormat::TarGz);
        assert_eq!(release.version(), Some("3.5.0"));

        let unversioned =
            ReleaseArtifact::new("https://example.com/dl/editor.tar.gz", "AGSEditor.exe").unwrap();
        assert_eq!(unversioned.version(), None);
    }

    #[test]
    fn rejects_unknown_archive_type() {
        let err = ReleaseArtifact::new("https://example.com/AGS.dmg", "x.exe").unwrap_err();
        assert!(err.to_string().contains("unsupported release archive"));
    }

    #[test]
    fn icon_digest_is_normalized() {
        let digest = "AB".repeat(32);
        let icon = IconSource::new("https://example.com/i.png", &digest).unwrap();
        assert_eq!(icon.sha256, "ab".repeat(32));
        assert!(IconSource::new("u", "xyz").is_err());
    }
}
