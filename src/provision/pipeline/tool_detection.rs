//! Executable resolution.
//!
//! Both the provisioner and the generated launcher locate tools the same
//! way: walk an ordered list of well-known paths, then fall back to a
//! `PATH` search for each name in priority order. The first hit wins.

use std::path::{Path, PathBuf};

use crate::provision::ToolLocator;

/// Resolves an executable from ordered candidates, then `PATH` names.
///
/// Probing stops at the first candidate for which `is_executable` returns
/// true; later candidates and the `PATH` lookup are not consulted.
///
/// # Examples
///
/// ```
/// use ags_provision::provision::pipeline::resolve_executable;
/// use std::path::{Path, PathBuf};
///
/// let found = resolve_executable(
///     &["/opt/homebrew/bin/wine", "/usr/local/bin/wine64"],
///     &["wine", "wine64"],
///     |p: &Path| p == Path::new("/usr/local/bin/wine64"),
///     |_: &str| None,
/// );
/// assert_eq!(found, Some(PathBuf::from("/usr/local/bin/wine64")));
/// ```
pub fn resolve_executable<P, E, L>(
    candidates: &[P],
    path_names: &[&str],
    mut is_executable: E,
    mut lookup: L,
) -> Option<PathBuf>
where
    P: AsRef<Path>,
    E: FnMut(&Path) -> bool,
    L: FnMut(&str) -> Option<PathBuf>,
{
    for candidate in candidates {
        let candidate: &Path = candidate.as_ref();
        if is_executable(candidate) {
            return Some(candidate.to_path_buf());
        }
    }
    path_names.iter().find_map(|&name| lookup(name))
}

/// [`resolve_executable`] backed by a [`ToolLocator`].
pub fn locate<P: AsRef<Path>>(
    locator: &dyn ToolLocator,
    candidates: &[P],
    path_names: &[&str],
) -> Option<PathBuf> {
    let found = resolve_executable(
        candidates,
        path_names,
        |path| locator.is_executable(path),
        |name| locator.find_in_path(name),
    );
    match &found {
        Some(path) => log::debug!("Resolved {:?} to {}", path_names, path.display()),
        None => log::debug!("Could not resolve any of {:?}", path_names),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn first_executable_candidate_wins_and_stops_probing() {
        let candidates = [
            "/opt/homebrew/bin/wine",
            "/opt/homebrew/bin/wine64",
            "/usr/local/bin/wine",
            "/usr/local/bin/wine64",
        ];
        let probed = RefCell::new(Vec::new());
        let found = resolve_executable(
            &candidates,
            &["wine", "wine64"],
            |p| {
                probed.borrow_mut().push(p.to_path_buf());
                p == Path::new("/opt/homebrew/bin/wine64")
            },
            |_| panic!("PATH must not be searched when a candidate matches"),
        );
        assert_eq!(found, Some(PathBuf::from("/opt/homebrew/bin/wine64")));
        assert_eq!(probed.borrow().len(), 2);
    }

    #[test]
    fn path_lookup_respects_name_priority() {
        let found = resolve_executable(
            &["/nowhere/wine"],
            &["wine", "wine64"],
            |_| false,
            |name| (name == "wine64").then(|| PathBuf::from("/custom/bin/wine64")),
        );
        assert_eq!(found, Some(PathBuf::from("/custom/bin/wine64")));

        let both = resolve_executable(
            &[] as &[&str],
            &["wine", "wine64"],
            |_| false,
            |name| Some(PathBuf::from(format!("/path/{name}"))),
        );
        assert_eq!(both, Some(PathBuf::from("/path/wine")));
    }

    #[test]
    fn nothing_resolves() {
        let found = resolve_executable(&["/a", "/b"], &["x"], |_| false, |_| None);
        assert_eq!(found, None);
    }
}
