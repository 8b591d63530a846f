use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

/// What the filesystem can tell us about a document right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentInfo {
    pub exists: bool,
    pub is_dir: bool,
    pub readable: bool,
}

impl DocumentInfo {
    /// Inspect a path. Never fails: a missing path is simply `exists == false`.
    pub fn inspect(path: &Path) -> Self {
        let Ok(meta) = fs::metadata(path) else {
            return Self::default();
        };

        let is_dir = meta.is_dir();
        let readable = if is_dir {
            fs::read_dir(path).is_ok()
        } else {
            File::open(path).is_ok()
        };

        Self {
            exists: true,
            is_dir,
            readable,
        }
    }
}

/// True if both paths point at the same filesystem entity.
///
/// Paths that cannot be resolved are never the same file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (fs::metadata(a), fs::metadata(b)) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}

/// Canonical form of a path, or its lexically normalized absolute form when
/// the path does not exist (stale index entries).
pub fn to_canonical_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        normalize_lexically(&absolute)
    })
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `path` relative to `root`, with `/` as separator on every platform.
///
/// Returns `None` if `path` is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

/// Join an index-relative path (`/`-separated) back onto the search root.
pub fn join_relative(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in relative.split('/').filter(|p| !p.is_empty()) {
        path.push(part);
    }
    path
}

/// Last segment of a `/`-separated relative path.
pub fn file_name(relative: &str) -> &str {
    let trimmed = relative.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
