use crate::error::{Result, SearchError};
use crate::index::types::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Sequential reader over an index file.
///
/// Call [`read_meta`](Self::read_meta) first to consume the leading metadata
/// lines, then pull records with [`next_entry`](Self::next_entry).
pub struct IndexReader<R: BufRead> {
    input: R,
    source: PathBuf,
    pending: Option<String>,
}

impl IndexReader<BufReader<File>> {
    /// Open an index file for reading
    pub fn open(index_path: &Path) -> Result<Self> {
        let file = File::open(index_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SearchError::IndexNotFound(index_path.to_path_buf())
            } else {
                SearchError::io(index_path, e)
            }
        })?;
        Ok(Self::new(BufReader::new(file), index_path))
    }
}

impl<R: BufRead> IndexReader<R> {
    /// `source` is only used to label errors
    pub fn new(input: R, source: impl Into<PathBuf>) -> Self {
        Self {
            input,
            source: source.into(),
            pending: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| SearchError::io(&self.source, e))?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Consume all leading `; key=value` lines.
    ///
    /// Comment lines without a `=` are skipped; the first non-comment line is
    /// kept for [`next_entry`](Self::next_entry).
    pub fn read_meta(&mut self) -> Result<IndexMeta> {
        let mut meta = IndexMeta::default();

        while let Some(line) = self.next_line()? {
            let Some(body) = line.strip_prefix(COMMENT_PREFIX) else {
                self.pending = Some(line);
                break;
            };
            if let Some((key, value)) = body.split_once(META_SEPARATOR) {
                meta.entries
                    .entry(key.trim().to_string())
                    .or_insert_with(|| value.to_string());
            }
        }

        Ok(meta)
    }

    /// Next entry record, skipping comment and blank lines
    pub fn next_entry(&mut self) -> Result<Option<FoundDocument>> {
        while let Some(line) = self.next_line()? {
            if line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            if let Some(entry) = parse_record(&line) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for IndexReader<R> {
    type Item = Result<FoundDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// Parse one record line. Missing trailing fields default to empty, a missing
/// path to `.`, and anything but a `D` prefix means "not a directory".
pub fn parse_record(line: &str) -> Option<FoundDocument> {
    if line.trim().is_empty() {
        return None;
    }

    let mut parts = line.split(FIELD_SEPARATOR);
    let is_dir = parts.next() == Some(DIR_PREFIX);
    let relative_path = parts
        .next()
        .filter(|p| !p.is_empty())
        .unwrap_or(".")
        .to_string();
    let mime_type = parts.next().unwrap_or("");
    let charset_name = parts.next().unwrap_or("");

    Some(FoundDocument {
        relative_path,
        is_dir,
        file_type: FileType::new(mime_type, charset_name),
    })
}
