use super::context::{Candidate, MatchStatus, SearchConfig, SearchContext, SearchTerms};
use super::Matcher;
use crate::error::Result;
use crate::utils::{file_name, matches_all_words, prepare_words_from_terms};

/// Matches path and file-name requirements against the candidate's relative path
pub struct FilePathMatcher {
    config: SearchConfig,
}

impl FilePathMatcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    fn check_words(&self, words: Option<&[String]>, text: &str, status: MatchStatus) -> MatchStatus {
        match words {
            None => status,
            Some(_) if status.is_rejected() => status,
            Some(words) => MatchStatus::from_match(matches_all_words(
                text,
                words,
                self.config.case_sensitive,
                self.config.case_word_split,
            )),
        }
    }
}

impl Matcher for FilePathMatcher {
    fn prepare(&self, terms: &SearchTerms, context: &mut SearchContext) {
        context.ignore_path(&self.config.index_path);
        context.path_words = prepare_words_from_terms(terms.path(), self.config.case_sensitive);
        context.name_words = prepare_words_from_terms(terms.file(), self.config.case_sensitive);
    }

    fn is_matching(
        &self,
        candidate: &Candidate,
        context: &SearchContext,
        status: MatchStatus,
    ) -> Result<MatchStatus> {
        if context.is_ignored(candidate.absolute_path()) {
            return Ok(MatchStatus::Reject);
        }

        let relative = candidate.relative_path();
        let status = self.check_words(context.path_words.as_deref(), relative, status);
        let status = self.check_words(context.name_words.as_deref(), file_name(relative), status);

        if status.is_accepted() && !self.config.include_dirs && candidate.is_dir() {
            return Ok(MatchStatus::Reject);
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, SearchConfig) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Projects/searchEngine")).unwrap();
        fs::write(dir.path().join("Projects/searchEngine/QueryParser.java"), "x").unwrap();
        let config = SearchConfig::new(dir.path()).unwrap();
        (dir, config)
    }

    fn evaluate(config: &SearchConfig, terms: &SearchTerms, rel: &str, is_dir: bool) -> MatchStatus {
        let matcher = FilePathMatcher::new(config.clone());
        let mut ctx = SearchContext::default();
        matcher.prepare(terms, &mut ctx);
        let candidate = Candidate::live(&config.root_dir.join(rel), is_dir, &config.root_dir);
        matcher.is_matching(&candidate, &ctx, MatchStatus::Undecided).unwrap()
    }

    #[test]
    fn test_no_requirements_forward_status() {
        let (_dir, config) = setup();
        let terms = SearchTerms::builder().content(["alpha"]).build();
        let status = evaluate(&config, &terms, "Projects/searchEngine/QueryParser.java", false);
        assert_eq!(status, MatchStatus::Undecided);
    }

    #[test]
    fn test_path_words_with_case_split() {
        let (_dir, config) = setup();
        let terms = SearchTerms::builder().path(["engine query"]).build();
        let status = evaluate(&config, &terms, "Projects/searchEngine/QueryParser.java", false);
        assert_eq!(status, MatchStatus::Accept);

        let config = SearchConfig {
            case_word_split: false,
            ..config
        };
        let status = evaluate(&config, &terms, "Projects/searchEngine/QueryParser.java", false);
        assert_eq!(status, MatchStatus::Reject);
    }

    #[test]
    fn test_name_words_only_see_file_name() {
        let (_dir, config) = setup();
        let terms = SearchTerms::builder().file(["projects"]).build();
        let status = evaluate(&config, &terms, "Projects/searchEngine/QueryParser.java", false);
        assert_eq!(status, MatchStatus::Reject);

        let terms = SearchTerms::builder().file(["parser JAVA"]).build();
        let status = evaluate(&config, &terms, "Projects/searchEngine/QueryParser.java", false);
        assert_eq!(status, MatchStatus::Accept);
    }

    #[test]
    fn test_failed_path_is_not_rescued_by_name() {
        let (_dir, config) = setup();
        let terms = SearchTerms::builder().path(["missing"]).file(["parser"]).build();
        let status = evaluate(&config, &terms, "Projects/searchEngine/QueryParser.java", false);
        assert_eq!(status, MatchStatus::Reject);
    }

    #[test]
    fn test_directories_need_include_dirs() {
        let (_dir, config) = setup();
        let terms = SearchTerms::builder().path(["search"]).build();
        let status = evaluate(&config, &terms, "Projects/searchEngine", true);
        assert_eq!(status, MatchStatus::Reject);

        let config = SearchConfig {
            include_dirs: true,
            ..config
        };
        let status = evaluate(&config, &terms, "Projects/searchEngine", true);
        assert_eq!(status, MatchStatus::Accept);
    }

    #[cfg(unix)]
    #[test]
    fn test_index_behind_symlink_is_ignored() {
        let (dir, config) = setup();
        fs::create_dir(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("alias")).unwrap();
        let config = config.index_path(&dir.path().join("sub").join("words.idx"));
        fs::write(&config.index_path, "").unwrap();

        let terms = SearchTerms::builder().file(["words"]).build();
        assert_eq!(evaluate(&config, &terms, "alias/words.idx", false), MatchStatus::Reject);
        assert_eq!(evaluate(&config, &terms, "sub/words.idx", false), MatchStatus::Reject);
    }

    #[test]
    fn test_index_file_is_ignored() {
        let (dir, config) = setup();
        fs::write(dir.path().join("index.dat"), "").unwrap();
        let terms = SearchTerms::builder().file(["index"]).build();
        let status = evaluate(&config, &terms, "index.dat", false);
        assert_eq!(status, MatchStatus::Reject);
        assert!(Path::new(&config.index_path).exists());
    }
}
