use super::context::{Candidate, MatchStatus, SearchConfig, SearchContext, SearchTerms};
use super::Matcher;
use crate::error::{Result, SearchError};
use crate::index::detect::{FileTypeDetector, TextFileTypeDetector};
use crate::utils::{extract_words, prepare_words_from_terms, strip_matching_words, DocumentInfo};
use encoding_rs::Encoding;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Matches "any" and content requirements.
///
/// "Any" words already present in the relative path are satisfied there; the
/// rest, together with the content words, must all occur somewhere in the
/// file's text. Directories and non-text files can only pass when nothing is
/// left to look for.
pub struct FileContentMatcher {
    config: SearchConfig,
    detector: Box<dyn FileTypeDetector>,
}

impl FileContentMatcher {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_detector(config, Box::new(TextFileTypeDetector::new()))
    }

    pub fn with_detector(config: SearchConfig, detector: Box<dyn FileTypeDetector>) -> Self {
        Self { config, detector }
    }

    fn remaining_words(&self, candidate: &Candidate, context: &SearchContext) -> Vec<String> {
        let mut remaining = strip_matching_words(
            context.any_words.as_deref().unwrap_or_default(),
            candidate.relative_path(),
            self.config.case_sensitive,
            self.config.case_word_split,
        );
        if let Some(content) = &context.content_words {
            remaining.extend(content.iter().cloned());
        }
        remaining
    }

    /// Stream the file line by line until every word has been seen
    fn has_all_words(&self, path: &Path, charset: &str, words: Vec<String>) -> Result<bool> {
        let encoding = Encoding::for_label(charset.as_bytes()).ok_or_else(|| {
            SearchError::UnsupportedCharset {
                path: path.to_path_buf(),
                charset: charset.to_string(),
            }
        })?;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!("skipping unreadable {}: {}", path.display(), e);
                return Ok(false);
            }
        };

        let mut missing: HashSet<String> = words.into_iter().collect();
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();

        while !missing.is_empty() {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| SearchError::io(path, e))?;
            if read == 0 {
                break;
            }

            let (text, _) = encoding.decode_without_bom_handling(&line);
            let line_words =
                extract_words(&text, self.config.case_sensitive, self.config.case_word_split);
            missing.retain(|w| !line_words.contains(w));
        }

        Ok(missing.is_empty())
    }
}

impl Matcher for FileContentMatcher {
    fn prepare(&self, terms: &SearchTerms, context: &mut SearchContext) {
        context.ignore_path(&self.config.index_path);
        context.any_words = prepare_words_from_terms(terms.any(), self.config.case_sensitive);
        context.content_words = prepare_words_from_terms(terms.content(), self.config.case_sensitive);
    }

    fn is_matching(
        &self,
        candidate: &Candidate,
        context: &SearchContext,
        status: MatchStatus,
    ) -> Result<MatchStatus> {
        if context.any_words.is_none() && context.content_words.is_none() {
            return Ok(status);
        }

        let remaining = self.remaining_words(candidate, context);
        let path = candidate.absolute_path();
        let info = DocumentInfo::inspect(path);

        if remaining.is_empty() {
            let excluded_dir = info.is_dir && !self.config.include_dirs;
            return Ok(MatchStatus::from_match(info.exists && !excluded_dir));
        }
        if info.is_dir || !info.exists || !info.readable {
            return Ok(MatchStatus::Reject);
        }

        let file_type = candidate.file_type(self.detector.as_ref());
        if !file_type.is_readable_text() {
            return Ok(MatchStatus::Reject);
        }

        let found = self.has_all_words(path, &file_type.charset_name, remaining)?;
        Ok(MatchStatus::from_match(found))
    }
}
