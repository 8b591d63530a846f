use crate::index::types::{FileType, CHARSET_FALLBACK, CHARSET_UTF8, PLAIN_TEXT};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected when classifying a file
pub const DEFAULT_SAMPLE_LEN: usize = 5000;

/// Classifies a file by MIME type and charset.
pub trait FileTypeDetector {
    /// `None` when this detector cannot tell what the file is.
    fn detect(&self, path: &Path) -> Option<FileType>;

    /// Same as [`detect`](Self::detect) but collapses "don't know" to [`FileType::unknown`].
    fn detect_file_type(&self, path: &Path) -> FileType {
        self.detect(path).unwrap_or_default()
    }
}

/// Recognizes plain text by sampling the start of a file.
///
/// Files it cannot classify are handed to the next detector, if any.
pub struct TextFileTypeDetector {
    next: Option<Box<dyn FileTypeDetector>>,
    max_sample_len: usize,
}

impl TextFileTypeDetector {
    pub fn new() -> Self {
        Self {
            next: None,
            max_sample_len: DEFAULT_SAMPLE_LEN,
        }
    }

    pub fn with_next(next: Box<dyn FileTypeDetector>) -> Self {
        Self {
            next: Some(next),
            max_sample_len: DEFAULT_SAMPLE_LEN,
        }
    }

    /// Inspect at most `len` leading bytes
    pub fn with_sample_len(mut self, len: usize) -> Self {
        self.max_sample_len = len;
        self
    }

    fn detect_by_next(&self, path: &Path) -> Option<FileType> {
        self.next.as_ref().and_then(|next| next.detect(path))
    }

    fn read_sample(&self, path: &Path) -> Option<Vec<u8>> {
        let file = File::open(path).ok()?;
        let mut sample = Vec::with_capacity(self.max_sample_len.min(8192));
        match file.take(self.max_sample_len as u64).read_to_end(&mut sample) {
            Ok(_) => Some(sample),
            Err(e) => {
                tracing::debug!("cannot sample {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl Default for TextFileTypeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTypeDetector for TextFileTypeDetector {
    fn detect(&self, path: &Path) -> Option<FileType> {
        if path.is_dir() {
            return self.detect_by_next(path);
        }

        let Some(sample) = self.read_sample(path) else {
            return self.detect_by_next(path);
        };

        if is_plain_text(&sample) {
            return Some(FileType::new(PLAIN_TEXT, detect_charset_name(&sample, self.max_sample_len)));
        }

        self.detect_by_next(path)
    }
}

/// Every byte is printable, or one of tab, line feed, carriage return.
pub fn is_plain_text(data: &[u8]) -> bool {
    data.iter()
        .all(|&b| b >= 0x20 || b == b'\t' || b == b'\n' || b == b'\r')
}

/// UTF-8 if the sample decodes cleanly, otherwise the single-byte fallback.
///
/// A sample that filled `sample_len` and was cut in the middle of a
/// multi-byte sequence still counts as UTF-8.
pub fn detect_charset_name(data: &[u8], sample_len: usize) -> &'static str {
    match std::str::from_utf8(data) {
        Ok(_) => CHARSET_UTF8,
        Err(e) if e.error_len().is_none() && data.len() >= sample_len => CHARSET_UTF8,
        Err(_) => CHARSET_FALLBACK,
    }
}
