//! Release download and extraction with replace semantics.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::extract::extract_archive;
use crate::provision::{Error, ErrorExt, Host, Result, Settings, utils::fs};

/// What the fetcher left on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedRelease {
    /// Directory the archive was extracted into.
    pub root: PathBuf,
    /// Files written by extraction.
    pub files: usize,
    /// Canonical entry-point path, when it was verified.
    pub entry_point: Option<PathBuf>,
    /// Whether the entry point had to be moved into place.
    pub relocated: bool,
}

/// Replaces the install target with a fresh copy of the release.
///
/// The previous install is deleted first, never merged. The download lives
/// in a temporary file that is removed on every exit path. Bundle variants
/// also verify the entry point (see [`ensure_entry_point`]).
pub async fn fetch_release(host: &Host<'_>, settings: &Settings) -> Result<FetchedRelease> {
    let release = settings.release();
    let target = settings.install_target();
    let root = settings.extract_dir();

    if target.symlink_metadata().is_ok() {
        host.reporter
            .progress(&format!("Removing previous install at {}", target.display()));
    }
    fs::remove_path(&target).await?;
    fs::create_dir_all(&root, false).await?;

    let download = tempfile::Builder::new()
        .prefix("ags-release-")
        .suffix(release.format().suffix())
        .tempfile()
        .map_err(Error::IoError)?
        .into_temp_path();

    host.reporter
        .progress(&format!("Downloading {}", release.file_name()));
    let bytes = host.transport.download(release.url(), &download).await?;
    if bytes == 0 {
        return Err(Error::Download {
            url: release.url().to_string(),
            reason: "server returned an empty file".into(),
        });
    }
    log::debug!("downloaded {bytes} bytes to {}", download.display());

    host.reporter
        .progress(&format!("Extracting into {}", root.display()));
    let files = extract_archive(&download, &root, release.format()).await?;
    drop(download);
    host.reporter
        .success(&format!("Extracted {files} files from {}", release.file_name()));

    let (entry_point, relocated) = if settings.variant().assembles_bundle() {
        let (path, relocated) = ensure_entry_point(&root, release.entry_point()).await?;
        if relocated {
            host.reporter.warn(&format!(
                "{} was not at the archive root; moved it to {}",
                release.entry_point(),
                path.display()
            ));
        }
        (Some(path), relocated)
    } else {
        (None, false)
    };

    Ok(FetchedRelease {
        root,
        files,
        entry_point,
        relocated,
    })
}

/// Makes sure `root/<name>` exists.
///
/// When it does not, the tree is searched for a file whose name matches
/// case-insensitively and the first match (in sorted walk order) is moved
/// into place. Returns the canonical path and whether a move happened.
pub async fn ensure_entry_point(root: &Path, name: &str) -> Result<(PathBuf, bool)> {
    let canonical = root.join(name);
    if canonical.is_file() {
        return Ok((canonical, false));
    }

    let found = find_case_insensitive(root, name)?.ok_or_else(|| Error::EntryPointMissing {
        name: name.to_string(),
        root: root.to_path_buf(),
    })?;

    log::debug!("moving {} to {}", found.display(), canonical.display());
    tokio::fs::rename(&found, &canonical)
        .await
        .fs_context("relocating entry point", &found)?;
    Ok((canonical, true))
}

/// First regular file under `root` named `name`, ignoring ASCII case.
pub fn find_case_insensitive(root: &Path, name: &str) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
        {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canonical_entry_point_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("AGSEditor.exe"), b"MZ").unwrap();

        let (path, moved) = ensure_entry_point(dir.path(), "AGSEditor.exe").await.unwrap();
        assert_eq!(path, dir.path().join("AGSEditor.exe"));
        assert!(!moved);
    }

    #[tokio::test]
    async fn nested_entry_point_is_moved_once() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("AGS-3.6/bin");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("agseditor.EXE"), b"MZ").unwrap();

        let (path, moved) = ensure_entry_point(dir.path(), "AGSEditor.exe").await.unwrap();
        assert!(moved);
        assert_eq!(std::fs::read(&path).unwrap(), b"MZ");
        assert!(!nested.join("agseditor.EXE").exists());

        let (_, moved_again) = ensure_entry_point(dir.path(), "AGSEditor.exe").await.unwrap();
        assert!(!moved_again);
    }

    #[tokio::test]
    async fn missing_entry_point_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();

        let err = ensure_entry_point(dir.path(), "AGSEditor.exe")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EntryPointMissing { .. }));
    }

    #[test]
    fn search_ignores_directories_with_matching_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/AGSEditor.exe")).unwrap();
        std::fs::write(dir.path().join("b.txt"), b"").unwrap();
        assert_eq!(find_case_insensitive(dir.path(), "AGSEditor.exe").unwrap(), None);
    }
}
