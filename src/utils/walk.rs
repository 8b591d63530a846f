use crate::error::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Visit every entry below `root` (the root itself excluded).
///
/// Children come before their directory, and siblings are visited in file
/// name order. Symbolic links are followed; entries that cannot be read,
/// including link loops, are logged and skipped.
pub fn walk_tree<F>(root: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&Path, bool) -> Result<()>,
{
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .contents_first(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => visit(entry.path(), entry.file_type().is_dir())?,
            Err(e) => tracing::warn!("skipping unreadable entry: {}", e),
        }
    }

    Ok(())
}
