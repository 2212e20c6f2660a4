//! Lexical path arithmetic used by navigation.
//!
//! None of these functions touch the filesystem: `.` and `..` are resolved on the
//! text of the path and symlinks are never followed. The filesystem root is its
//! own parent.

use std::path::{Component, Path, PathBuf};

/// Collapses `.` segments, repeated separators and `..` segments.
///
/// A `..` directly below the root is dropped, a leading `..` in a relative
/// path is kept. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Path of the child `name` below `parent`.
pub fn child(parent: &Path, name: &str) -> PathBuf {
    normalize(&parent.join(name))
}

/// Parent of `path`. The root, or a path with nothing left to strip, maps to itself.
pub fn parent(path: &Path) -> PathBuf {
    let path = normalize(path);
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => path,
    }
}

/// True for `/` on unix, or a drive root on windows.
pub fn is_root(path: &Path) -> bool {
    let path = normalize(path);
    path.has_root() && path.parent().is_none()
}

/// Resolves `path` against `cwd` when relative, then normalizes.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}
