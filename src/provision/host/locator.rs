//! Executable lookup on the real system.

use std::path::{Path, PathBuf};

use super::ToolLocator;

/// Checks file permissions directly and searches `PATH` with `which`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLocator;

impl ToolLocator for SystemLocator {
    fn is_executable(&self, path: &Path) -> bool {
        let Ok(metadata) = std::fs::metadata(path) else {
            return false;
        };
        if !metadata.is_file() {
            return false;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o111 != 0
        }
        #[cfg(not(unix))]
        {
            true
        }
    }

    fn find_in_path(&self, name: &str) -> Option<PathBuf> {
        match which::which(name) {
            Ok(path) => {
                log::debug!("Found {} at: {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", name, e);
                None
            }
        }
    }
}
