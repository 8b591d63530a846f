use super::{report, SearchStrategy, SearchSummary};
use crate::error::{Result, SearchError};
use crate::index::reader::IndexReader;
use crate::index::types::IndexMeta;
use crate::matcher::{Candidate, MatcherChain, SearchConfig, SearchTerms};
use crate::output::OutputSink;
use crate::utils::is_same_file;
use std::path::Path;

/// Evaluates the records of a prebuilt index instead of walking the tree
pub struct IndexedSearch {
    config: SearchConfig,
}

impl IndexedSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// The index must have been built for the directory being searched
    fn check_source(&self, meta: &IndexMeta) -> Result<()> {
        let source = meta
            .source_path()
            .ok_or_else(|| SearchError::MissingSourcePath(self.config.index_path.clone()))?;

        if !is_same_file(Path::new(source), &self.config.root_dir) {
            return Err(SearchError::SourceMismatch {
                search: self.config.root_dir.clone(),
                indexed: source.to_string(),
            });
        }
        Ok(())
    }
}

impl SearchStrategy for IndexedSearch {
    fn name(&self) -> &'static str {
        "indexed"
    }

    fn search(
        &self,
        terms: &SearchTerms,
        chain: &MatcherChain,
        sink: &mut dyn OutputSink,
    ) -> Result<SearchSummary> {
        let index_path = &self.config.index_path;
        let mut reader = IndexReader::open(index_path)?;

        if !self.config.brief {
            report(
                sink,
                &format!("Searching in index file: {}", index_path.display()),
            )?;
        }

        let context = chain.prepare(terms);
        self.check_source(&reader.read_meta()?)?;

        let mut summary = SearchSummary::default();
        while let Some(document) = reader.next_entry()? {
            summary.candidates += 1;
            let candidate = Candidate::indexed(document, &self.config.root_dir);
            if !chain.is_match(&candidate, &context)? {
                continue;
            }

            let path = candidate.absolute_path();
            if !path.exists() {
                tracing::debug!("skipping stale index entry {}", path.display());
                continue;
            }
            summary.matches += 1;
            sink.found(path)
                .map_err(|e| SearchError::io("<output>", e))?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::FileIndexer;
    use crate::index::detect::TextFileTypeDetector;
    use crate::output::MemorySink;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn indexed_tree() -> (TempDir, SearchConfig) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/parser")).unwrap();
        fs::write(dir.path().join("src/parser/lexer.rs"), "fn next_token() {}\n").unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}\n").unwrap();

        let config = SearchConfig::new(dir.path()).unwrap();
        let detector = TextFileTypeDetector::new();
        FileIndexer::new(&config.root_dir, &config.index_path, &detector)
            .unwrap()
            .silent(true)
            .build_index(&mut MemorySink::default())
            .unwrap();
        (dir, config)
    }

    fn run(config: &SearchConfig, terms: &SearchTerms) -> Result<(SearchSummary, MemorySink)> {
        let chain = MatcherChain::standard(config);
        let mut sink = MemorySink::default();
        let summary = IndexedSearch::new(config.clone()).search(terms, &chain, &mut sink)?;
        Ok((summary, sink))
    }

    #[test]
    fn test_search_index_records() {
        let (_dir, config) = indexed_tree();
        let terms = SearchTerms::builder().content(["token"]).build();
        let (summary, sink) = run(&config, &terms).unwrap();

        assert_eq!(sink.found, vec![config.root_dir.join("src/parser/lexer.rs")]);
        assert_eq!(summary.candidates, 4);
        assert_eq!(
            sink.status,
            vec![format!("Searching in index file: {}", config.index_path.display())]
        );
    }

    #[test]
    fn test_stale_records_are_skipped() {
        let (_dir, config) = indexed_tree();
        fs::remove_file(config.root_dir.join("src/main.rs")).unwrap();

        let terms = SearchTerms::builder().file(["main"]).build();
        let (summary, sink) = run(&config, &terms).unwrap();
        assert!(sink.found.is_empty());
        assert_eq!(summary.matches, 0);
    }

    #[test]
    fn test_index_for_other_directory() {
        let (_dir, config) = indexed_tree();
        let other = tempdir().unwrap();
        let config = SearchConfig {
            root_dir: other.path().canonicalize().unwrap(),
            ..config
        };

        let terms = SearchTerms::builder().any(["main"]).build();
        let err = run(&config, &terms).err().unwrap();
        assert!(matches!(err, SearchError::SourceMismatch { .. }));
    }

    #[test]
    fn test_missing_source_path() {
        let dir = tempdir().unwrap();
        let config = SearchConfig {
            brief: true,
            ..SearchConfig::new(dir.path()).unwrap()
        };
        fs::write(&config.index_path, "F*a.txt*text/plain*UTF-8*\n").unwrap();

        let terms = SearchTerms::builder().any(["a"]).build();
        let err = run(&config, &terms).err().unwrap();
        assert!(matches!(err, SearchError::MissingSourcePath(_)));
    }
}
