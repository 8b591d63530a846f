use crate::error::{Result, SearchError};
use crate::index::detect::FileTypeDetector;
use crate::index::types::{FileType, FoundDocument};
use crate::utils::{
    AppConfig, is_same_file, join_relative, relative_path, to_canonical_path, DEFAULT_INDEX_FILE_NAME,
};
use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Settings of one search or index run, shared by every matcher and strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Canonical search root
    pub root_dir: PathBuf,
    pub index_path: PathBuf,
    pub case_sensitive: bool,
    pub case_word_split: bool,
    pub include_dirs: bool,
    /// Bare path listing, no status lines
    pub brief: bool,
}

impl SearchConfig {
    /// Config with built-in defaults and the index stored inside `root`
    pub fn new(root: &Path) -> Result<Self> {
        Self::with_defaults(root, &AppConfig::default())
    }

    /// Config seeded from persistent defaults
    pub fn with_defaults(root: &Path, defaults: &AppConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(SearchError::DirectoryNotFound(root.to_path_buf()));
        }
        let root_dir = root.canonicalize().map_err(|e| SearchError::io(root, e))?;
        let file_name = if defaults.index_file_name.is_empty() {
            DEFAULT_INDEX_FILE_NAME
        } else {
            defaults.index_file_name.as_str()
        };
        let index_path = to_canonical_path(&root_dir.join(file_name));

        Ok(Self {
            root_dir,
            index_path,
            case_sensitive: defaults.case_sensitive,
            case_word_split: defaults.case_word_split,
            include_dirs: defaults.include_dirs,
            brief: defaults.brief,
        })
    }

    pub fn index_path(mut self, path: &Path) -> Self {
        self.index_path = to_canonical_path(path);
        self
    }
}

/// Raw words per requirement category.
///
/// `None` means the category was not given at all. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    any: Option<Vec<String>>,
    file: Option<Vec<String>>,
    path: Option<Vec<String>>,
    content: Option<Vec<String>>,
}

impl SearchTerms {
    pub fn builder() -> SearchTermsBuilder {
        SearchTermsBuilder::default()
    }

    /// Must appear in the path or in the content
    pub fn any(&self) -> Option<&[String]> {
        self.any.as_deref()
    }

    /// Must appear in the file name
    pub fn file(&self) -> Option<&[String]> {
        self.file.as_deref()
    }

    /// Must appear in the relative path
    pub fn path(&self) -> Option<&[String]> {
        self.path.as_deref()
    }

    /// Must appear in the content
    pub fn content(&self) -> Option<&[String]> {
        self.content.as_deref()
    }

    /// Every raw term across all categories
    pub fn all_terms(&self) -> Vec<&str> {
        [&self.any, &self.file, &self.path, &self.content]
            .into_iter()
            .flatten()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.all_terms().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SearchTermsBuilder {
    terms: SearchTerms,
}

fn extend_terms<I, S>(slot: &mut Option<Vec<String>>, words: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    slot.get_or_insert_with(Vec::new)
        .extend(words.into_iter().map(Into::into));
}

impl SearchTermsBuilder {
    pub fn any<I: IntoIterator<Item = S>, S: Into<String>>(mut self, words: I) -> Self {
        extend_terms(&mut self.terms.any, words);
        self
    }

    pub fn file<I: IntoIterator<Item = S>, S: Into<String>>(mut self, words: I) -> Self {
        extend_terms(&mut self.terms.file, words);
        self
    }

    pub fn path<I: IntoIterator<Item = S>, S: Into<String>>(mut self, words: I) -> Self {
        extend_terms(&mut self.terms.path, words);
        self
    }

    pub fn content<I: IntoIterator<Item = S>, S: Into<String>>(mut self, words: I) -> Self {
        extend_terms(&mut self.terms.content, words);
        self
    }

    pub fn build(self) -> SearchTerms {
        self.terms
    }
}

/// Per-search scratch state, filled by each matcher's `prepare`
#[derive(Debug, Default)]
pub struct SearchContext {
    ignored_paths: HashSet<PathBuf>,
    /// Folded requirement words for the file name
    pub name_words: Option<Vec<String>>,
    /// Folded requirement words for the relative path
    pub path_words: Option<Vec<String>>,
    /// Folded requirement words satisfied by path or content
    pub any_words: Option<Vec<String>>,
    /// Folded requirement words for the content
    pub content_words: Option<Vec<String>>,
}

impl SearchContext {
    pub fn ignore_path(&mut self, path: &Path) {
        self.ignored_paths.insert(to_canonical_path(path));
    }

    /// True if the path is, or resolves to, an ignored file
    pub fn is_ignored(&self, absolute_path: &Path) -> bool {
        self.ignored_paths.contains(absolute_path)
            || self
                .ignored_paths
                .iter()
                .any(|ignored| is_same_file(ignored, absolute_path))
    }
}

/// Outcome of one matcher for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatus {
    /// No matcher has asserted anything yet
    #[default]
    Undecided,
    Accept,
    Reject,
}

impl MatchStatus {
    pub fn from_match(matched: bool) -> Self {
        if matched {
            MatchStatus::Accept
        } else {
            MatchStatus::Reject
        }
    }

    pub fn is_accepted(self) -> bool {
        self == MatchStatus::Accept
    }

    pub fn is_rejected(self) -> bool {
        self == MatchStatus::Reject
    }
}

/// One filesystem entry under evaluation
#[derive(Debug)]
pub enum Candidate {
    /// Read back from an index; type and charset are already known
    Indexed {
        document: FoundDocument,
        absolute_path: PathBuf,
    },
    /// Found by walking the tree; type is detected on first use
    Walked {
        absolute_path: PathBuf,
        relative_path: String,
        is_dir: bool,
        file_type: OnceCell<FileType>,
    },
}

impl Candidate {
    pub fn indexed(document: FoundDocument, root: &Path) -> Self {
        let absolute_path = to_canonical_path(&join_relative(root, &document.relative_path));
        Candidate::Indexed {
            document,
            absolute_path,
        }
    }

    pub fn live(absolute_path: &Path, is_dir: bool, root: &Path) -> Self {
        let relative_path = relative_path(root, absolute_path)
            .unwrap_or_else(|| absolute_path.to_string_lossy().into_owned());
        Candidate::Walked {
            absolute_path: absolute_path.to_path_buf(),
            relative_path,
            is_dir,
            file_type: OnceCell::new(),
        }
    }

    pub fn relative_path(&self) -> &str {
        match self {
            Candidate::Indexed { document, .. } => &document.relative_path,
            Candidate::Walked { relative_path, .. } => relative_path,
        }
    }

    pub fn absolute_path(&self) -> &Path {
        match self {
            Candidate::Indexed { absolute_path, .. } | Candidate::Walked { absolute_path, .. } => {
                absolute_path
            }
        }
    }

    pub fn is_dir(&self) -> bool {
        match self {
            Candidate::Indexed { document, .. } => document.is_dir,
            Candidate::Walked { is_dir, .. } => *is_dir,
        }
    }

    /// Known type for indexed entries; detected once and cached for live ones
    pub fn file_type(&self, detector: &dyn FileTypeDetector) -> &FileType {
        match self {
            Candidate::Indexed { document, .. } => &document.file_type,
            Candidate::Walked {
                absolute_path,
                file_type,
                ..
            } => file_type.get_or_init(|| detector.detect_file_type(absolute_path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_terms_builder() {
        let terms = SearchTerms::builder()
            .any(["alpha"])
            .content(["beta gamma"])
            .any(vec!["delta".to_string()])
            .build();

        assert_eq!(terms.any().unwrap(), &["alpha".to_string(), "delta".to_string()]);
        assert_eq!(terms.file(), None);
        assert_eq!(terms.all_terms(), vec!["alpha", "delta", "beta gamma"]);
        assert!(!terms.is_empty());
    }

    #[test]
    fn test_empty_category_is_not_none() {
        let terms = SearchTerms::builder().path(Vec::<String>::new()).build();
        assert_eq!(terms.path(), Some(&[][..]));
        assert!(terms.is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempdir().unwrap();
        let config = SearchConfig::new(dir.path()).unwrap();
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.root_dir, root);
        assert_eq!(config.index_path, root.join("index.dat"));
        assert!(config.case_word_split);
        assert!(!config.case_sensitive);

        let missing = dir.path().join("missing");
        assert!(matches!(
            SearchConfig::new(&missing),
            Err(SearchError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_ignored_paths() {
        let dir = tempdir().unwrap();
        let index = dir.path().join("index.dat");
        fs::write(&index, "").unwrap();

        let mut ctx = SearchContext::default();
        ctx.ignore_path(&index);
        assert!(ctx.is_ignored(&index.canonicalize().unwrap()));
        assert!(!ctx.is_ignored(&dir.path().join("other")));
    }

    #[test]
    fn test_match_status() {
        assert_eq!(MatchStatus::default(), MatchStatus::Undecided);
        assert!(MatchStatus::from_match(true).is_accepted());
        assert!(MatchStatus::from_match(false).is_rejected());
        assert!(!MatchStatus::Undecided.is_accepted());
    }

    struct CountingDetector(Cell<usize>);

    impl FileTypeDetector for CountingDetector {
        fn detect(&self, _path: &Path) -> Option<FileType> {
            self.0.set(self.0.get() + 1);
            Some(FileType::new("text/plain", "UTF-8"))
        }
    }

    #[test]
    fn test_live_candidate_detects_once() {
        let root = Path::new("/data/docs");
        let candidate = Candidate::live(&root.join("a/b.txt"), false, root);
        assert_eq!(candidate.relative_path(), "a/b.txt");

        let detector = CountingDetector(Cell::new(0));
        candidate.file_type(&detector);
        candidate.file_type(&detector);
        assert_eq!(detector.0.get(), 1);
    }

    #[test]
    fn test_indexed_candidate_uses_recorded_type() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let doc = FoundDocument::new("sub/x.txt", false, FileType::new("text/plain", "UTF-8"));
        let candidate = Candidate::indexed(doc, &root);

        assert_eq!(candidate.absolute_path(), root.join("sub").join("x.txt"));
        let detector = CountingDetector(Cell::new(0));
        assert_eq!(candidate.file_type(&detector).charset_name, "UTF-8");
        assert_eq!(detector.0.get(), 0);
    }
}
