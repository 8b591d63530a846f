//! Error type shared by the matching, indexing and search layers.

use std::io;
use std::path::{Path, PathBuf};

/// Fatal errors. Per-document problems (unreadable file, binary content,
/// excluded directory) are never reported here; they are plain non-matches.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Directory does not exist: [{}]", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Search terms not provided")]
    MissingTerms,

    #[error("Cannot create an index file - already exists: [{}]", .0.display())]
    IndexExists(PathBuf),

    #[error("Index file not found: [{}]", .0.display())]
    IndexNotFound(PathBuf),

    #[error(
        "Invalid search directory - not compatible with used index \
         (search directory: [{}], index built for directory: [{}])",
        .search.display(),
        .indexed
    )]
    SourceMismatch { search: PathBuf, indexed: String },

    #[error("Index does not record its source directory: [{}]", .0.display())]
    MissingSourcePath(PathBuf),

    #[error("Wrong encoding for file: {}, encoding: {charset}", .path.display())]
    UnsupportedCharset { path: PathBuf, charset: String },

    #[error("IO error on [{}]: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SearchError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        SearchError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
