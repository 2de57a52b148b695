//! Repository path resolution.

use std::path::{Component, Path, PathBuf};

/// Path an operation acts on.
///
/// An explicit path is made absolute against the process current directory
/// and lexically cleaned. If the current directory is unavailable the cleaned
/// path is returned as given. Without an explicit path the default working
/// directory is returned untouched.
pub fn resolve_path(explicit: Option<&Path>, default: &Path) -> PathBuf {
    match explicit.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => absolutize(path),
        None => default.to_path_buf(),
    }
}

/// Clone target: the explicit path exactly as given, else the default.
///
/// The target may not exist yet, so it is passed to `git clone` verbatim.
pub fn clone_target(explicit: Option<&Path>, default: &Path) -> PathBuf {
    match explicit.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => default.to_path_buf(),
    }
}

pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return clean_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => clean_path(&cwd.join(path)),
        Err(_) => clean_path(path),
    }
}

/// Lexical cleanup: drops `.` segments and redundant separators, folds `..`
/// into its parent. `..` above the root of an absolute path is discarded;
/// leading `..` of a relative path is kept. Never touches the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.last() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            other => cleaned.push(other),
        }
    }

    if cleaned.is_empty() {
        return PathBuf::from(".");
    }
    cleaned.iter().collect()
}
