use crate::error::{Result, SearchError};
use crate::index::detect::FileTypeDetector;
use crate::index::types::*;
use crate::index::writer::IndexWriter;
use crate::output::OutputSink;
use crate::utils::progress::walk_spinner;
use crate::utils::{is_same_file, relative_path, walk_tree};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counts of what went into a freshly built index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub files: usize,
    pub dirs: usize,
    pub text_files: usize,
}

/// Builds a flat index file for one directory tree
pub struct FileIndexer<'a> {
    root: PathBuf,
    index_path: PathBuf,
    detector: &'a dyn FileTypeDetector,
    silent: bool,
}

impl<'a> FileIndexer<'a> {
    pub fn new(root: &Path, index_path: &Path, detector: &'a dyn FileTypeDetector) -> Result<Self> {
        if !root.is_dir() {
            return Err(SearchError::DirectoryNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize().map_err(|e| SearchError::io(root, e))?;

        Ok(Self {
            root,
            index_path: index_path.to_path_buf(),
            detector,
            silent: false,
        })
    }

    /// Hide the progress spinner
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn index_exists(&self) -> bool {
        index_exists(&self.index_path)
    }

    /// Delete any existing index, then build a fresh one
    pub fn rebuild_index(&self, sink: &mut dyn OutputSink) -> Result<IndexSummary> {
        if self.index_exists() {
            remove_index(&self.index_path)?;
        }
        self.build_index(sink)
    }

    /// Build the index. Fails if an index file already exists at the target path.
    pub fn build_index(&self, sink: &mut dyn OutputSink) -> Result<IndexSummary> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.index_path)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    SearchError::IndexExists(self.index_path.clone())
                } else {
                    SearchError::io(&self.index_path, e)
                }
            })?;

        tracing::info!(
            "building index {} for {}",
            self.index_path.display(),
            self.root.display()
        );

        match self.write_index(file) {
            Ok(summary) => {
                sink.status("Index created")
                    .map_err(|e| SearchError::io("<output>", e))?;
                Ok(summary)
            }
            Err(e) => {
                // Never leave a partial index behind.
                if let Err(rm) = fs::remove_file(&self.index_path) {
                    tracing::warn!("cannot remove partial index {}: {}", self.index_path.display(), rm);
                }
                Err(e)
            }
        }
    }

    fn write_index(&self, file: File) -> Result<IndexSummary> {
        let io_err = |e: std::io::Error| SearchError::io(&self.index_path, e);

        let mut writer = IndexWriter::new(BufWriter::new(file));
        writer
            .write_meta(META_SOURCE_PATH, &self.root.to_string_lossy())
            .map_err(io_err)?;
        writer
            .write_meta(META_VERSION, &INDEX_VERSION.to_string())
            .map_err(io_err)?;
        writer
            .write_meta(META_CREATED_AT, &unix_now().to_string())
            .map_err(io_err)?;

        let spinner = walk_spinner(self.silent, "Indexing entries...");
        let mut summary = IndexSummary::default();

        walk_tree(&self.root, |path, is_dir| {
            if !is_dir && is_same_file(path, &self.index_path) {
                return Ok(());
            }
            // Records are UTF-8 text
            if path.strip_prefix(&self.root).ok().and_then(Path::to_str).is_none() {
                tracing::warn!("cannot index {}: name is not valid UTF-8", path.display());
                return Ok(());
            }
            let Some(relative) = relative_path(&self.root, path) else {
                return Ok(());
            };

            let file_type = if is_dir {
                summary.dirs += 1;
                FileType::unknown()
            } else {
                summary.files += 1;
                self.detector.detect_file_type(path)
            };
            if file_type.is_readable_text() {
                summary.text_files += 1;
            }

            writer
                .write_entry(&FoundDocument::new(relative, is_dir, file_type))
                .map_err(io_err)?;

            if let Some(ref sp) = spinner {
                sp.inc(1);
            }
            Ok(())
        })?;

        if let Some(sp) = spinner {
            sp.finish_and_clear();
        }
        writer.finish().map_err(io_err)?;

        tracing::info!(
            "indexed {} files ({} text) and {} directories",
            summary.files,
            summary.text_files,
            summary.dirs
        );
        Ok(summary)
    }
}

pub fn index_exists(index_path: &Path) -> bool {
    index_path.exists()
}

/// Remove an index file. Returns `false` if there was nothing to remove.
pub fn remove_index(index_path: &Path) -> Result<bool> {
    match fs::remove_file(index_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SearchError::io(index_path, e)),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
