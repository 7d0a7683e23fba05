//! Release archive extraction.
//!
//! Runs on the blocking pool. Entries that would land outside the
//! destination are rejected rather than skipped.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::provision::{Error, Result, settings::ArchiveFormat};

/// Unpacks `archive` into `dest`, returning the number of files written.
pub async fn extract_archive(archive: &Path, dest: &Path, format: ArchiveFormat) -> Result<usize> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    let reported = archive.clone();

    tokio::task::spawn_blocking(move || match format {
        ArchiveFormat::Zip => extract_zip(&archive, &dest),
        ArchiveFormat::TarGz => extract_tar_gz(&archive, &dest),
    })
    .await
    .map_err(|e| Error::Extract {
        archive: reported,
        reason: format!("extraction task failed: {e}"),
    })?
}

fn extract_failed(archive: &Path, reason: impl ToString) -> Error {
    Error::Extract {
        archive: archive.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Extracts a zip archive.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| extract_failed(archive_path, e))?;
    let mut archive =
        zip::ZipArchive::new(BufReader::new(file)).map_err(|e| extract_failed(archive_path, e))?;

    fs::create_dir_all(dest).map_err(|e| extract_failed(archive_path, e))?;
    let mut written = 0;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| extract_failed(archive_path, e))?;
        let relative: PathBuf = entry.enclosed_name().ok_or_else(|| {
            extract_failed(
                archive_path,
                format!("entry escapes the destination: {}", entry.name()),
            )
        })?;
        let target = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| extract_failed(archive_path, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| extract_failed(archive_path, e))?;
        }
        let mut out = File::create(&target).map_err(|e| extract_failed(archive_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| extract_failed(archive_path, e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|e| extract_failed(archive_path, e))?;
        }

        written += 1;
    }

    Ok(written)
}

/// Extracts a gzip-compressed tarball.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| extract_failed(archive_path, e))?;
    let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);
    archive.set_preserve_permissions(true);

    fs::create_dir_all(dest).map_err(|e| extract_failed(archive_path, e))?;
    let mut written = 0;

    for entry in archive
        .entries()
        .map_err(|e| extract_failed(archive_path, e))?
    {
        let mut entry = entry.map_err(|e| extract_failed(archive_path, e))?;
        let is_dir = entry.header().entry_type().is_dir();
        let name = entry
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        // `unpack_in` refuses `..` components and absolute paths.
        let unpacked = entry
            .unpack_in(dest)
            .map_err(|e| extract_failed(archive_path, e))?;
        if !unpacked {
            return Err(extract_failed(
                archive_path,
                format!("entry escapes the destination: {name}"),
            ));
        }
        if !is_dir {
            written += 1;
        }
    }

    Ok(written)
}
