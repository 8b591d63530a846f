use std::collections::BTreeMap;

/// Record type prefix for files
pub const FILE_PREFIX: &str = "F";
/// Record type prefix for directories
pub const DIR_PREFIX: &str = "D";
/// Prefix of metadata (comment) lines
pub const COMMENT_PREFIX: &str = "; ";
pub const FIELD_SEPARATOR: char = '*';
pub const META_SEPARATOR: char = '=';

/// Metadata key holding the canonical directory the index was built from
pub const META_SOURCE_PATH: &str = "source-path";
pub const META_VERSION: &str = "version";
pub const META_CREATED_AT: &str = "created-at";

/// Current index format version
pub const INDEX_VERSION: u32 = 1;

pub const PLAIN_TEXT: &str = "text/plain";
pub const TEXT_PREFIX: &str = "text/";
pub const JSON_TYPE: &str = "application/json";
pub const XML_TYPE: &str = "application/xml";

pub const CHARSET_UTF8: &str = "UTF-8";
/// Charset reported for text that is not valid UTF-8
pub const CHARSET_FALLBACK: &str = "US-ASCII";

/// True for MIME types whose content can be scanned for words
pub fn is_text_type(mime_type: &str) -> bool {
    mime_type.starts_with(TEXT_PREFIX) || mime_type == JSON_TYPE || mime_type == XML_TYPE
}

/// Everything we know about a file that is required for reading it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FileType {
    pub mime_type: String,
    pub charset_name: String,
}

impl FileType {
    pub fn new(mime_type: impl Into<String>, charset_name: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            charset_name: charset_name.into(),
        }
    }

    /// Sentinel meaning "do not attempt content matching"
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.mime_type.is_empty() && self.charset_name.is_empty()
    }

    /// Text-like MIME type and a known charset
    pub fn is_readable_text(&self) -> bool {
        is_text_type(&self.mime_type) && !self.charset_name.is_empty()
    }
}

/// One discovered filesystem entry, as stored in an index record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundDocument {
    /// Path relative to the indexed root, `/`-separated
    pub relative_path: String,
    pub is_dir: bool,
    pub file_type: FileType,
}

impl FoundDocument {
    pub fn new(relative_path: impl Into<String>, is_dir: bool, file_type: FileType) -> Self {
        Self {
            relative_path: relative_path.into(),
            is_dir,
            file_type,
        }
    }
}

/// Leading `; key=value` lines of an index file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMeta {
    pub entries: BTreeMap<String, String>,
}

impl IndexMeta {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn source_path(&self) -> Option<&str> {
        self.get(META_SOURCE_PATH)
    }

    pub fn version(&self) -> Option<u32> {
        self.get(META_VERSION).and_then(|v| v.parse().ok())
    }

    pub fn created_at(&self) -> Option<u64> {
        self.get(META_CREATED_AT).and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text_type() {
        assert!(is_text_type(PLAIN_TEXT));
        assert!(is_text_type("text/html"));
        assert!(is_text_type(JSON_TYPE));
        assert!(is_text_type(XML_TYPE));
        assert!(!is_text_type("application/pdf"));
        assert!(!is_text_type(""));
    }

    #[test]
    fn test_readable_text_needs_charset() {
        assert!(FileType::new(PLAIN_TEXT, CHARSET_UTF8).is_readable_text());
        assert!(!FileType::new(PLAIN_TEXT, "").is_readable_text());
        assert!(!FileType::unknown().is_readable_text());
        assert!(FileType::unknown().is_unknown());
    }

    #[test]
    fn test_meta_accessors() {
        let mut meta = IndexMeta::default();
        meta.entries.insert(META_SOURCE_PATH.into(), "/data/docs".into());
        meta.entries.insert(META_VERSION.into(), "1".into());
        assert_eq!(meta.source_path(), Some("/data/docs"));
        assert_eq!(meta.version(), Some(1));
        assert_eq!(meta.created_at(), None);
    }
}
